//! CLI that replays the classic `this` binding walkthrough.
//!
//! Usage:
//!   just-bind scenario all                  # Run every scenario
//!   just-bind --mode permissive scenario counter
//!   just-bind --config just-bind.toml scenario scope

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use just_bind::runner::config::{BindingMode, ResolverConfig};
use just_bind::runner::ds::function_object::new_routine;
use just_bind::runner::ds::object::{get_property, object_from, set_property, JsObjectType};
use just_bind::runner::ds::operations::type_conversion::expect_string;
use just_bind::runner::ds::value::JsValue;
use just_bind::runner::eval::{CallDescriptor, ContextResolver};
use just_bind::runner::jobs::JobQueue;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "just-bind")]
#[command(version = "0.1.0")]
#[command(about = "Shows which object `this` binds to for each kind of call")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Binding mode for plain calls (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    mode: Option<ModeArg>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Strict,
    Permissive,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one of the walkthrough scenarios
    Scenario {
        #[arg(value_enum, default_value = "all")]
        name: ScenarioName,
    },
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum ScenarioName {
    /// identify.call(me) / say.call(you)
    Identify,
    /// foo(i) five times, hoping to count on foo.count
    Counter,
    /// bar(i) five times, counting on a data object
    Object,
    /// barFoo.call(barFoo, i), the routine as its own context
    #[value(name = "self")]
    SelfRef,
    /// fooScope() trying to reach barScope through this
    Scope,
    /// obj.method handed to setTimeout
    Timeout,
    All,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut config = match &cli.config {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ResolverConfig::from_env()?,
    };
    if let Some(mode) = cli.mode {
        config.mode = match mode {
            ModeArg::Strict => BindingMode::Strict,
            ModeArg::Permissive => BindingMode::Permissive,
        };
    }
    tracing::info!("running in {} mode", config.mode);

    match cli.command {
        Commands::Scenario { name } => {
            let all = name == ScenarioName::All;
            // A fresh resolver per scenario keeps permissive-mode globals apart.
            let runs: [(ScenarioName, fn(&ContextResolver)); 6] = [
                (ScenarioName::Identify, identify_scenario),
                (ScenarioName::Counter, counter_scenario),
                (ScenarioName::Object, object_scenario),
                (ScenarioName::SelfRef, self_scenario),
                (ScenarioName::Scope, scope_scenario),
                (ScenarioName::Timeout, timeout_scenario),
            ];
            for (scenario, run) in runs.iter() {
                if all || *scenario == name {
                    run(&ContextResolver::new(config.clone()));
                    println!("------------");
                }
            }
        }
    }
    Ok(())
}

fn report(result: Result<JsValue, just_bind::runner::ds::error::JErrorType>) {
    match result {
        Ok(JsValue::Undefined) => {}
        Ok(v) => println!("{}", v),
        Err(e) => println!("{}", e),
    }
}

fn person(name: &str) -> JsObjectType {
    object_from(vec![("name", JsValue::str(name))])
}

fn identify_scenario(resolver: &ContextResolver) {
    let identify = new_routine("identify", |frame, _args| {
        let name = frame.get_field("name")?;
        Ok(JsValue::String(expect_string(&name, "toUpperCase")?.to_uppercase()))
    });
    let id = identify.clone();
    let say = new_routine("say", move |frame, _args| {
        let who = frame.call_with_this(id.clone(), vec![])?;
        println!("Hello, I'm {}", who);
        Ok(JsValue::Undefined)
    });

    let me = person("ibrahem ghaemi");
    let you = person("fatemeh");
    for ctx in [&me, &you].iter() {
        report(
            resolver
                .invoke(CallDescriptor::explicit(identify.clone(), ctx, vec![]))
                .map(|o| o.value),
        );
    }
    for ctx in [&me, &you].iter() {
        report(
            resolver
                .invoke(CallDescriptor::explicit(say.clone(), ctx, vec![]))
                .map(|o| o.value),
        );
    }
}

fn counter_scenario(resolver: &ContextResolver) {
    let foo = new_routine("foo", |frame, args| {
        println!("foo: {}", args.first().cloned().unwrap_or(JsValue::Undefined));
        frame.increment_field("count")?;
        Ok(JsValue::Undefined)
    });
    set_property(&foo, "count", JsValue::int(0));
    for i in 0..5 {
        if let Err(e) = resolver.invoke(CallDescriptor::plain(foo.clone(), vec![JsValue::int(i)])) {
            println!("{}", e);
            break;
        }
    }
    println!("foo.count = {}", get_property(&foo, "count"));
    if let Some(global) = resolver.default_binding().context() {
        println!("global count = {}", get_property(global, "count"));
    }
}

fn object_scenario(resolver: &ContextResolver) {
    let data = object_from(vec![("count", JsValue::int(0))]);
    let bar = new_routine("bar", |frame, args| {
        println!("Bar: {}", args.first().cloned().unwrap_or(JsValue::Undefined));
        frame.increment_field("count")
    });
    set_property(&data, "bar", JsValue::Object(bar));
    for i in 0..5 {
        report(
            resolver
                .invoke(CallDescriptor::method(&data, "bar", vec![JsValue::int(i)]))
                .map(|_| JsValue::Undefined),
        );
    }
    println!("data.count = {}", get_property(&data, "count"));
}

fn self_scenario(resolver: &ContextResolver) {
    let bar_foo = new_routine("barFoo", |frame, args| {
        println!("barFoo: {}", args.first().cloned().unwrap_or(JsValue::Undefined));
        frame.increment_field("count")
    });
    set_property(&bar_foo, "count", JsValue::int(0));
    for i in 0..5 {
        report(
            resolver
                .invoke(CallDescriptor::explicit(
                    bar_foo.clone(),
                    &bar_foo,
                    vec![JsValue::int(i)],
                ))
                .map(|_| JsValue::Undefined),
        );
    }
    println!("barFoo.count = {}", get_property(&bar_foo, "count"));
}

fn scope_scenario(resolver: &ContextResolver) {
    let bar_scope = new_routine("barScope", |frame, _args| frame.get_field("a"));
    let foo_scope = new_routine("fooScope", move |frame, _args| {
        // `a` and `barScope` are in scope here, but `this` cannot reach them.
        let _a = JsValue::int(2);
        let _lexical = bar_scope.clone();
        frame.call_this_method("barScope", vec![])
    });
    report(
        resolver
            .invoke(CallDescriptor::plain(foo_scope, vec![]))
            .map(|o| o.value),
    );
}

fn timeout_scenario(resolver: &ContextResolver) {
    let obj = person("timer owner");
    let show = new_routine("show", |frame, _args| match frame.this().context() {
        Some(_) => Ok(JsValue::String(format!(
            "this.name = {}",
            frame.get_field("name")?
        ))),
        None => Ok(JsValue::str("<no context>")),
    });
    set_property(&obj, "show", JsValue::Object(show.clone()));

    let mut queue = JobQueue::new();
    queue.set_timeout(get_property(&obj, "show"), 10, vec![]);
    queue.enqueue(CallDescriptor::explicit(show, &obj, vec![]), 20);
    for result in queue.run(resolver) {
        report(result.map(|o| o.value));
    }
}
