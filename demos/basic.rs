//! Minimal demonstration of decorating a dynamic callable with `runtype`.
//!
//! Mirrors the shape of the workspace's own binary entry point: initialize
//! a logger, do the work, report failures through `log::error!`.
use std::error::Error;

use log::{error, info};
use runtype::{
    decorate, CallArgs, CheckerConfig, Param, ParamKind, RawHint, Signature, TypeDescriptor, Value,
};

fn divide(args: CallArgs) -> Result<Value, runtype::CallError> {
    let a = *args.positional[0].downcast_ref::<i64>().unwrap();
    let b = *args.positional[1].downcast_ref::<i64>().unwrap();
    Ok(Value::new(a / b))
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::init_with_level(log::Level::Info)?;

    let signature = Signature::new(vec![
        Param::new("a", ParamKind::PositionalOrKeyword)
            .with_hint(RawHint::Class(TypeDescriptor::of::<i64>("int"))),
        Param::new("b", ParamKind::PositionalOrKeyword)
            .with_hint(RawHint::Class(TypeDescriptor::of::<i64>("int"))),
    ])
    .with_return_hint(RawHint::Class(TypeDescriptor::of::<i64>("int")));

    let checked = decorate("divide", None, None, &signature, &CheckerConfig::default(), divide)?;

    let ok = checked.call(CallArgs::positional_only(vec![Value::new(10i64), Value::new(2i64)]))?;
    info!("divide(10, 2) = {}", ok.downcast_ref::<i64>().unwrap());

    match checked.call(CallArgs::positional_only(vec![Value::new(10i64), Value::new("nope")])) {
        Ok(_) => unreachable!("a str argument must fail its int hint"),
        Err(e) => error!("expected failure: {e}"),
    }

    Ok(())
}
