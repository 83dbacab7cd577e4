//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 组合 handler 的输出格式 (text / json)
//! - 派生 handler 的隔离性
//! - 错误聚合
//! - 从配置文件构建

#[cfg(test)]
mod support {
    use std::io::{self, Write};
    use std::sync::Arc;

    use contracts::{Attr, Context, HandlerError, Level, LogHandler, Record, SharedHandler};
    use handlers::{HandlerOptions, JsonHandler, SharedBuffer, SharedWriter, TextHandler};

    pub fn text(name: &str) -> (SharedHandler, SharedBuffer) {
        text_at(name, Level::INFO)
    }

    pub fn text_at(name: &str, level: Level) -> (SharedHandler, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let handler = TextHandler::new(name, buffer.clone().into(), HandlerOptions::new(level));
        (Arc::new(handler), buffer)
    }

    pub fn json(name: &str) -> (SharedHandler, SharedBuffer) {
        json_at(name, Level::INFO)
    }

    pub fn json_at(name: &str, level: Level) -> (SharedHandler, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let handler = JsonHandler::new(name, buffer.clone().into(), HandlerOptions::new(level));
        (Arc::new(handler), buffer)
    }

    /// Writer that always fails
    pub struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    pub fn broken(name: &str) -> SharedHandler {
        Arc::new(TextHandler::new(
            name,
            SharedWriter::from_writer(Broken),
            HandlerOptions::default(),
        ))
    }

    /// Adds a `tagged_by` attribute to the record it receives before delegating
    pub struct Tagging {
        pub tag: String,
        pub inner: SharedHandler,
    }

    impl LogHandler for Tagging {
        fn enabled(&self, ctx: &Context, level: Level) -> bool {
            self.inner.enabled(ctx, level)
        }

        fn handle(&self, ctx: &Context, mut record: Record) -> Result<(), HandlerError> {
            record.add_attrs([Attr::new("tagged_by", self.tag.clone())]);
            self.inner.handle(ctx, record)
        }

        fn with_attrs(&self, attrs: Vec<Attr>) -> SharedHandler {
            Arc::new(Tagging {
                tag: self.tag.clone(),
                inner: self.inner.with_attrs(attrs),
            })
        }

        fn with_group(&self, name: &str) -> SharedHandler {
            Arc::new(Tagging {
                tag: self.tag.clone(),
                inner: self.inner.with_group(name),
            })
        }
    }
}

#[cfg(test)]
mod e2e_tests {
    use composer::{compose, Shape};
    use contracts::{Attr, Context, HandlerError, Level, Logger, Record, SharedHandler};
    use regex::Regex;

    use crate::support::{broken, json, json_at, text, text_at};

    const TIME_MILLIS: &str = r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z";

    fn info(message: &str) -> Record {
        Record::now(Level::INFO, message)
    }

    #[test]
    fn test_text_and_json_receive_same_record() {
        let (t, text_out) = text("text");
        let (j, json_out) = json("json");
        let both = compose([t, j]);
        assert_eq!(Shape::of(both.as_ref()), Shape::Pair);

        both.handle(&Context::background(), info("hello world").with_attr("user", "test"))
            .unwrap();

        let text_re = Regex::new(&format!(
            r#"^time={TIME_MILLIS} level=INFO msg="hello world" user=test\n$"#
        ))
        .unwrap();
        assert!(text_re.is_match(&text_out.contents()), "{}", text_out.contents());

        let json_re = Regex::new(
            r#"^\{"time":"[^"]+","level":"INFO","msg":"hello world","user":"test"\}\n$"#,
        )
        .unwrap();
        assert!(json_re.is_match(&json_out.contents()), "{}", json_out.contents());
    }

    #[test]
    fn test_with_attrs_leaves_original_untouched() {
        let (t, text_out) = text("text");
        let (j, json_out) = json("json");
        let base = compose([t, j]);
        let derived = base.with_attrs(vec![Attr::new("service", "api")]);
        let ctx = Context::background();

        derived.handle(&ctx, info("from derived")).unwrap();
        base.handle(&ctx, info("from base")).unwrap();

        let text_lines = text_out.lines();
        assert!(text_lines[0].ends_with(r#"msg="from derived" service=api"#));
        assert!(text_lines[1].ends_with(r#"msg="from base""#));

        let json_lines = json_out.lines();
        assert!(json_lines[0].ends_with(r#""msg":"from derived","service":"api"}"#));
        assert!(json_lines[1].ends_with(r#""msg":"from base"}"#));
    }

    #[test]
    fn test_with_group_nests_attrs() {
        let (t, text_out) = text("text");
        let (j, json_out) = json("json");
        let grouped = compose([t, j]).with_group("req");

        grouped
            .handle(&Context::background(), info("user login").with_attr("user_id", 42))
            .unwrap();

        assert!(text_out.contents().ends_with(" req.user_id=42\n"));
        let parsed: serde_json::Value = serde_json::from_str(&json_out.lines()[0]).unwrap();
        assert_eq!(parsed["req"]["user_id"], 42);
    }

    #[test]
    fn test_failing_handler_does_not_stop_siblings() {
        let (j, json_out) = json("json");
        let composite = compose([broken("broken"), j]);

        let err = composite
            .handle(&Context::background(), info("still delivered"))
            .unwrap_err();

        assert!(matches!(err, HandlerError::Write { ref handler, .. } if handler == "broken"));
        assert_eq!(json_out.lines().len(), 1);
    }

    #[test]
    fn test_all_failures_are_joined_in_order() {
        let (t, text_out) = text("text");
        let composite = compose([broken("first"), t, broken("second")]);

        let err = composite
            .handle(&Context::background(), info("partial"))
            .unwrap_err();

        let names: Vec<_> = err
            .causes()
            .map(|cause| match cause {
                HandlerError::Write { handler, .. } => handler.clone(),
                other => panic!("unexpected cause: {other}"),
            })
            .collect();
        assert_eq!(names, vec!["first", "second"]);
        for cause in err.causes() {
            assert!(err.is(cause));
        }
        assert_eq!(text_out.lines().len(), 1);
    }

    #[test]
    fn test_zero_handlers() {
        let nothing = compose(Vec::<SharedHandler>::new());
        let ctx = Context::background();

        assert!(!nothing.enabled(&ctx, Level::ERROR));
        assert!(nothing.handle(&ctx, info("dropped")).is_ok());
        let decorated = nothing.with_attrs(vec![Attr::new("k", "v")]).with_group("g");
        assert_eq!(Shape::of(decorated.as_ref()), Shape::Empty);
    }

    #[test]
    fn test_levels_are_filtered_per_handler() {
        let (t, text_out) = text_at("text", Level::WARN);
        let (j, json_out) = json_at("json", Level::DEBUG);
        let logger = Logger::new(compose([t, j]));
        let ctx = Context::background();

        logger.log(&ctx, Level::INFO, "info only json", []).unwrap();
        logger.log(&ctx, Level::ERROR, "both", []).unwrap();
        logger.log(&ctx, Level::new(-8), "nobody", []).unwrap();

        assert_eq!(text_out.lines().len(), 1);
        assert_eq!(json_out.lines().len(), 2);
        assert!(!logger.enabled(&ctx, Level::new(-8)));
    }

    #[test]
    fn test_logger_decorations() {
        let (t, text_out) = text("text");
        let logger = Logger::new(compose([t]))
            .with([Attr::new("service", "api")])
            .with_group("req");

        logger.info("handled", [Attr::new("status", 200)]);

        assert!(text_out
            .contents()
            .ends_with(" msg=handled service=api req.status=200\n"));
    }

    #[test]
    fn test_nested_composites_flatten() {
        let (a, out_a) = text("a");
        let (b, out_b) = text("b");
        let (c, out_c) = json("c");
        let inner = compose([a, b]);
        let outer = compose([Some(inner), None, Some(c)]);

        assert_eq!(Shape::of(outer.as_ref()), Shape::List(3));
        outer.handle(&Context::background(), info("once each")).unwrap();
        for out in [out_a, out_b, out_c] {
            assert_eq!(out.lines().len(), 1);
        }
    }

    #[test]
    fn test_concurrent_records_do_not_interleave() {
        let (t, text_out) = text("text");
        let (j, json_out) = json("json");
        let composite = compose([t, j]);

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let composite = composite.clone();
                scope.spawn(move || {
                    for n in 0..25 {
                        let record = info("tick").with_attr("worker", worker).with_attr("n", n);
                        composite.handle(&Context::background(), record).unwrap();
                    }
                });
            }
        });

        let line_re = Regex::new(&format!(
            r"^time={TIME_MILLIS} level=INFO msg=tick worker=\d+ n=\d+$"
        ))
        .unwrap();
        let lines = text_out.lines();
        assert_eq!(lines.len(), 200);
        assert!(lines.iter().all(|line| line_re.is_match(line)));

        for line in json_out.lines() {
            let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
            assert_eq!(parsed["msg"], "tick");
        }
    }
}

#[cfg(test)]
mod isolation_tests {
    use std::sync::Arc;

    use composer::compose;
    use contracts::{Context, Level, Record, SharedHandler};

    use crate::support::{text, Tagging};

    #[test]
    fn test_records_are_copied_per_handler() {
        let (tagged, tagged_out) = text("tagged");
        let (plain, plain_out) = text("plain");
        let tagger: SharedHandler = Arc::new(Tagging {
            tag: "first".to_string(),
            inner: tagged,
        });

        compose([tagger, plain])
            .handle(&Context::background(), Record::now(Level::INFO, "copy"))
            .unwrap();

        assert!(tagged_out.contents().ends_with(" tagged_by=first\n"));
        assert!(!plain_out.contents().contains("tagged_by"));
    }

    #[test]
    fn test_earlier_handler_never_sees_later_mutation() {
        let (plain, plain_out) = text("plain");
        let (tagged, tagged_out) = text("tagged");
        let (tail, tail_out) = text("tail");
        let tagger: SharedHandler = Arc::new(Tagging {
            tag: "middle".to_string(),
            inner: tagged,
        });

        compose([plain, tagger, tail])
            .handle(&Context::background(), Record::now(Level::INFO, "copy"))
            .unwrap();

        assert!(!plain_out.contents().contains("tagged_by"));
        assert!(tagged_out.contents().contains("tagged_by=middle"));
        assert!(!tail_out.contents().contains("tagged_by"));
    }
}

#[cfg(test)]
mod error_tests {
    use std::sync::Arc;

    use composer::compose;
    use contracts::{Context, HandlerError, Level, Record, SharedHandler};

    use crate::support::{broken, Tagging};

    #[test]
    fn test_wrapped_composite_error_stays_identifiable() {
        let wrapper: SharedHandler = Arc::new(Tagging {
            tag: "wrapper".to_string(),
            inner: compose([broken("x"), broken("y")]),
        });
        let ctx = Context::background();
        let record = Record::now(Level::INFO, "nested");

        let wrapper_err = wrapper.handle(&ctx, record.clone()).unwrap_err();
        let err = compose([wrapper, broken("z")])
            .handle(&ctx, record)
            .unwrap_err();

        assert_eq!(err.causes().count(), 2);
        assert!(err.is(&wrapper_err));
        let z = err.causes().nth(1).unwrap();
        assert!(matches!(z, HandlerError::Write { handler, .. } if handler == "z"));
        for inner in wrapper_err.causes() {
            assert!(err.is(inner));
        }
    }
}

#[cfg(test)]
mod config_tests {
    use composer::Shape;
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{Attr, Context, Level};

    #[test]
    fn test_composite_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let text_path = dir.path().join("logs").join("app.log");
        let json_path = dir.path().join("logs").join("audit.jsonl");
        let config = format!(
            r#"
group = "app"

[attrs]
service = "checkout"

[[handlers]]
name = "console"
type = "text"
output = {{ file = {text:?} }}

[[handlers]]
name = "audit"
type = "json"
level = "warn"
output = {{ file = {json:?} }}

[[handlers]]
name = "trace"
type = "tracing"
"#,
            text = text_path.display().to_string(),
            json = json_path.display().to_string(),
        );
        let config_path = dir.path().join("logging.toml");
        std::fs::write(&config_path, config).unwrap();

        let blueprint = ConfigLoader::load_from_path(&config_path).unwrap();
        let logger = handlers::build_logger(&blueprint).unwrap();
        assert_eq!(Shape::of(logger.handler().as_ref()), Shape::List(3));

        let ctx = Context::background();
        logger
            .log(&ctx, Level::INFO, "order placed", [Attr::new("order", 7)])
            .unwrap();
        logger
            .log(&ctx, Level::ERROR, "payment failed", [Attr::new("order", 7)])
            .unwrap();

        let text = std::fs::read_to_string(&text_path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains(r#"msg="order placed" service=checkout app.order=7"#));

        let audit = std::fs::read_to_string(&json_path).unwrap();
        assert_eq!(audit.lines().count(), 1);
        let parsed: serde_json::Value = serde_json::from_str(audit.trim()).unwrap();
        assert_eq!(parsed["level"], "ERROR");
        assert_eq!(parsed["service"], "checkout");
        assert_eq!(parsed["app"]["order"], 7);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_build() {
        let content = r#"
group = ""

[[handlers]]
name = "console"
type = "text"
"#;
        let err = ConfigLoader::load_from_str(content, ConfigFormat::Toml).unwrap_err();
        assert!(err.to_string().contains("group"));
    }
}
