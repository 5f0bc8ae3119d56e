use std::cell::RefCell;
use std::rc::Rc;

use docroute::{
    command_components, console_error_handler, console_unhandled_command_reporter, Arg, Args,
    Command, CommandLine, OptionValue, ParserInit, RequiredArg,
};

const VERSION: &str = "0.0.0";

const USAGE: &str = "
testCLI, the docopt Command Line Handler.

Usage:
  testCLI eags transform rdbms erd <spec-file.ts>
  testCLI eags transform rdbms sql <dialect-name> <spec-file.ts>
  testCLI eags transform middleware server nestjs-typeorm <spec-file.ts>
  testCLI eags transform test-optional-args <spec-file.ts> [--path=PATH] [--verbose]
  testCLI -h | --help
  testCLI -V | --version

Options:
  -h --help       Show this screen.
  -V --version    Show testCLI version.
  --dest=<path>   Destination path for generated artifacts
";

fn transform_erd(args: Args) -> String {
    assert_eq!(args.len(), 3);
    assert_eq!(args.get::<&str>(0), Some(&"cli"));
    assert_eq!(args.get::<&str>(1), Some(&"customPrepend"));
    assert_eq!(args.text(2), Some("./test.file"));
    "handled eags ERD".to_string()
}

fn transform_sql(args: Args) -> String {
    assert_eq!(args.len(), 3);
    assert_eq!(args.text(1), Some("SQLite:naming"));
    assert_eq!(args.text(2), Some("./test.ts"));
    "handled eags SQL".to_string()
}

fn transform_optional_args(args: Args) -> String {
    assert_eq!(args.text(1), Some("spec-file.ts"));
    assert_eq!(args.text(2), Some("PATH"));
    assert_eq!(args.option(3), Some(&OptionValue::Bool(true)));
    "handled eags optional args".to_string()
}

fn register_commands(cl: &mut CommandLine<String>) {
    let erd = command_components("eags transform rdbms erd");
    let erd = Command::from_components(erd, transform_erd).unwrap();
    cl.register(erd.arg("<spec-file.ts>"));

    let sql = ["eags", "transform", "rdbms", "sql"];
    let sql = Command::from_components(sql, transform_sql).unwrap();
    cl.register(sql.args(["<dialect-name>", "<spec-file.ts>"]));

    let optional = "eags transform test-optional-args";
    let optional = Command::new(optional, transform_optional_args).unwrap();
    cl.register(optional.args(["<spec-file.ts>", "--path", "--verbose"]));
}

fn command_line(argv: &str) -> CommandLine<String> {
    CommandLine::new(
        USAGE,
        ParserInit::with_argv_line(argv),
        VERSION,
        console_error_handler,
        console_unhandled_command_reporter,
        register_commands,
    )
}

type Reports = Rc<RefCell<Vec<(String, bool)>>>;

/// Command line whose error handler records every (message, fatal) report
fn recording_command_line(argv: &str) -> (CommandLine<String>, Reports) {
    let reports = Reports::default();
    let sink = Rc::clone(&reports);
    let cl = CommandLine::new(
        USAGE,
        ParserInit::with_argv_line(argv),
        VERSION,
        move |_: &CommandLine<String>, message: &str, fatal: bool| {
            sink.borrow_mut().push((message.to_string(), fatal));
        },
        console_unhandled_command_reporter,
        register_commands,
    );
    (cl, reports)
}

fn ctx(values: &[&'static str]) -> Vec<Arg> {
    values.iter().map(|v| Box::new(*v) as Arg).collect()
}

#[test]
fn command_line_erd() {
    let cl = command_line("eags transform rdbms erd ./test.file");
    assert!(cl.is_valid(), "CommandLine is not valid");
    assert_eq!(cl.text_option("<spec-file.ts>"), Some("./test.file"));

    let result = cl.handle(ctx(&["cli", "customPrepend"])).unwrap();
    assert_eq!(result.as_deref(), Some("handled eags ERD"));
}

#[test]
fn command_line_sql() {
    let cl = command_line("eags transform rdbms sql SQLite:naming ./test.ts");
    assert!(cl.is_valid());
    assert_eq!(cl.text_option("<spec-file.ts>"), Some("./test.ts"));

    let result = cl.handle(ctx(&["cli"])).unwrap();
    assert_eq!(result.as_deref(), Some("handled eags SQL"));
}

#[test]
fn command_line_optional_arguments() {
    let argv = "eags transform test-optional-args spec-file.ts --path=PATH --verbose";
    let cl = command_line(argv);
    assert!(cl.is_valid());

    let result = cl.handle(ctx(&["cli"])).unwrap();
    assert_eq!(result.as_deref(), Some("handled eags optional args"));
}

#[test]
fn command_line_unhandled() {
    let cl = CommandLine::new(
        USAGE,
        ParserInit::with_argv_line("eags transform middleware server nestjs-typeorm ./spec.ts"),
        VERSION,
        console_error_handler,
        |_: &CommandLine<String>| "unhandled".to_string(),
        register_commands,
    );
    assert!(cl.is_valid());

    let result = cl.handle(ctx(&["cli"])).unwrap();
    assert_eq!(result.as_deref(), Some("unhandled"));
}

#[test]
fn command_line_invalid_argv() {
    let cl = command_line("eags transform rdbms");
    assert!(!cl.is_valid());
    assert!(cl.options().is_none());
    assert_eq!(cl.handle(Vec::new()).unwrap(), None);
}

#[test]
fn command_line_version_request_is_not_fatal() {
    let (cl, reports) = recording_command_line("--version");
    assert!(!cl.is_valid());
    assert_eq!(cl.handle(Vec::new()).unwrap(), None);

    // Once at construction, once more from handle()
    let reports = reports.borrow();
    assert_eq!(reports.len(), 2);
    for (message, fatal) in reports.iter() {
        assert!(!fatal);
        assert_eq!(message, VERSION);
    }
}

#[test]
fn command_line_help_request_is_not_fatal() {
    let (cl, reports) = recording_command_line("-h");
    assert!(!cl.is_valid());

    let reports = reports.borrow();
    assert_eq!(reports.len(), 1);
    let (message, fatal) = &reports[0];
    assert!(!fatal);
    assert!(message.starts_with("testCLI, the docopt"));
    assert!(message.contains("Usage:"));
}

#[test]
fn command_line_bad_argv_is_fatal() {
    let (cl, reports) = recording_command_line("eags transform rdbms");
    assert!(!cl.is_valid());

    let reports = reports.borrow();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].1);
}

#[test]
fn command_line_shared_context_as_prepend_arg() {
    type Visits = Rc<RefCell<Vec<String>>>;

    let visits = Visits::default();
    let cl = CommandLine::new(
        USAGE,
        ParserInit::with_argv_line("eags transform rdbms erd ./test.file"),
        VERSION,
        console_error_handler,
        console_unhandled_command_reporter,
        |cl: &mut CommandLine<String>| {
            let record = |args: Args| {
                let visits = args.get::<Visits>(0).unwrap();
                let file = args.text(1).unwrap_or_default().to_string();
                visits.borrow_mut().push(file);
                "recorded".to_string()
            };
            let erd = Command::new("eags transform rdbms erd", record).unwrap();
            cl.register(erd.arg("<spec-file.ts>"));
        },
    );

    let context: Arg = Box::new(Rc::clone(&visits));
    let result = cl.handle(vec![context]).unwrap();
    assert_eq!(result.as_deref(), Some("recorded"));
    assert_eq!(*visits.borrow(), vec!["./test.file"]);
}

#[test]
fn command_line_handle_is_repeatable() {
    let cl = command_line("eags transform rdbms sql SQLite:naming ./test.ts");
    let first = cl.handle(ctx(&["cli"])).unwrap();
    let second = cl.handle(ctx(&["cli"])).unwrap();
    assert_eq!(first, second);
}

#[test]
fn command_line_required_arg_failure_is_returned() {
    let cl: CommandLine<String> = CommandLine::new(
        USAGE,
        ParserInit::with_argv_line("eags transform rdbms sql SQLite:naming ./test.ts"),
        VERSION,
        console_error_handler,
        console_unhandled_command_reporter,
        |cl| {
            let dialect = RequiredArg::new("<dialect-name>")
                .name("Dialect")
                .transform(|s| s.strip_prefix("Postgres:").map(str::to_string));
            let sql = Command::new("eags transform rdbms sql", |_: Args| String::new());
            cl.register(sql.unwrap().arg(dialect));
        },
    );

    let err = cl.handle(Vec::new()).unwrap_err();
    assert_eq!(err.to_string(), "Dialect 'SQLite:naming' is not valid.");
}

#[test]
fn command_line_typical_factory() {
    let cl: CommandLine<Option<String>> = CommandLine::typical(USAGE, VERSION, |_| {});
    // Process arguments belong to the test harness, not to this grammar
    assert!(!cl.is_valid());
    assert_eq!(cl.version(), VERSION);
}
