//! Tests for exit strategies and fatal-error handling.

use std::cell::Cell;
use std::time::{Duration, UNIX_EPOCH};

use crate::console::Console;
use crate::time::FixedClock;

use super::{Cleanup, ExitError, ExitHandler, ExitStrategy, FatalReport, Traced};

type TestHandler = ExitHandler<Vec<u8>, FixedClock>;

fn handler() -> TestHandler {
    let clock = FixedClock(UNIX_EPOCH + Duration::from_secs(1_592_224_496));
    ExitHandler::with_console(Console::new(Vec::new(), clock))
}

fn output(handler: TestHandler) -> String {
    String::from_utf8(handler.into_console().into_inner()).unwrap()
}

fn wrapped() -> Traced {
    Traced::wrap(Traced::new("root failure"), "outer context")
}

mod strategy_names {
    use super::*;

    #[test]
    fn parse_registered_names() {
        assert_eq!("simple".parse::<ExitStrategy>().unwrap(), ExitStrategy::Simple);
        assert_eq!("detail".parse::<ExitStrategy>().unwrap(), ExitStrategy::Detail);
    }

    #[test]
    fn unknown_name_lists_registered_names() {
        let err = "stack".parse::<ExitStrategy>().unwrap_err();

        assert!(matches!(err, ExitError::UnknownStrategy { ref name, .. } if name == "stack"));
        assert!(err.to_string().contains(r#""simple", "detail""#));
    }

    #[test]
    fn default_is_detail() {
        assert_eq!(ExitStrategy::default(), ExitStrategy::Detail);
        assert_eq!(handler().strategy(), ExitStrategy::Detail);
    }
}

mod rendering {
    use super::*;

    #[test]
    fn simple_renders_short_message_only() {
        let rendered = ExitStrategy::Simple.render(&wrapped());

        assert_eq!(rendered, "outer context: root failure");
    }

    #[test]
    fn detail_appends_root_detail() {
        let rendered = ExitStrategy::Detail.render(&wrapped());
        let (message, detail) = rendered.split_once('\n').unwrap();

        assert_eq!(message, "outer context: root failure");
        assert!(detail.starts_with("root failure\n    at src/error/exit_tests.rs:"));
    }
}

mod set_strategy {
    use super::*;

    #[test]
    fn switches_active_strategy() {
        let mut handler = handler();

        assert_eq!(handler.set_strategy("simple").unwrap(), ExitStrategy::Simple);
        assert_eq!(handler.strategy(), ExitStrategy::Simple);
    }

    #[test]
    fn unknown_name_keeps_previous_strategy() {
        let mut handler = handler();
        handler.set_strategy("simple").unwrap();

        assert!(handler.set_strategy("bogus").is_err());
        assert_eq!(handler.strategy(), ExitStrategy::Simple);

        let report = handler.handle_fatal(Some(&wrapped()), Vec::new()).unwrap();
        assert_eq!(report.message(), "outer context: root failure");
        assert!(!output(handler).contains("    at "));
    }
}

mod handle_fatal {
    use super::*;

    #[test]
    fn no_error_is_a_no_op() {
        let calls = Cell::new(0);
        let mut handler = handler();

        let report = handler.handle_fatal(None, vec![Box::new(|| calls.set(calls.get() + 1))]);

        assert!(report.is_none());
        assert_eq!(calls.get(), 0);
        assert!(output(handler).is_empty());
    }

    #[test]
    fn prints_prefixed_message() {
        let mut handler = handler();
        handler.set_strategy("simple").unwrap();

        handler.handle_fatal(Some(&wrapped()), Vec::new()).unwrap();

        assert_eq!(
            output(handler),
            "Mon Jun 15 12:34:56.0000 UTC 2020 * * * * * * \
             exit on fatal error: outer context: root failure\n"
        );
    }

    #[test]
    fn detail_prints_root_location() {
        let mut handler = handler();

        let report = handler.handle_fatal(Some(&wrapped()), Vec::new()).unwrap();

        assert!(report.message().contains("\nroot failure\n    at "));
        assert!(output(handler).contains("exit on fatal error: outer context: root failure\nroot failure\n    at "));
    }

    #[test]
    fn runs_cleanups_in_order() {
        let order = Cell::new(Vec::new());
        let push = |n: u8| {
            let order = &order;
            Box::new(move || {
                let mut seen = order.take();
                seen.push(n);
                order.set(seen);
            }) as Cleanup<'_>
        };
        let mut handler = handler();

        let report = handler
            .handle_fatal(Some(&wrapped()), vec![push(1), push(2), push(3)])
            .unwrap();

        assert_eq!(order.take(), vec![1, 2, 3]);
        assert_eq!(report.failed_cleanups(), 0);
    }

    #[test]
    fn panicking_cleanup_does_not_stop_the_rest() {
        let calls = Cell::new(0);
        let mut handler = handler();

        let report = handler
            .handle_fatal(
                Some(&wrapped()),
                vec![
                    Box::new(|| calls.set(calls.get() + 1)),
                    Box::new(|| panic!("cleanup failed")),
                    Box::new(|| calls.set(calls.get() + 1)),
                ],
            )
            .unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(report.failed_cleanups(), 1);
    }

    #[test]
    fn exit_on_err_passes_ok_values_through() {
        let calls = Cell::new(0);
        let mut handler = handler();

        let value = handler.exit_on_err(
            Ok::<_, Traced>(42),
            vec![Box::new(|| calls.set(calls.get() + 1))],
        );

        assert_eq!(value, 42);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn exit_code_is_one() {
        assert_eq!(FatalReport::EXIT_CODE, 1);
    }
}
