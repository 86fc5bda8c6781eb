//! Bridges runner hooks into OpenTelemetry spans, exported to stdout.
//!
//! Run with: `cargo run --example observability`
//!
//! With API keys in `.env` the chained workflow runs for real; without them
//! the fetch step fails and the span records the error instead. Either way
//! every step lands on the span as an event.

use std::sync::{Arc, Mutex};

use opentelemetry::trace::{TraceContextExt, Tracer};
use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::trace::SdkTracerProvider;

use outreach_line::cases::QUICK_TEST_URL;
use outreach_line::outreach::{OutreachState, build_chained_pipeline};
use outreach_line::{Config, Ctx, Runner};

fn main() {
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
        .build();
    global::set_tracer_provider(provider.clone());
    let tracer = global::tracer("outreach-line");

    let mut ctx = match Config::from_env() {
        Ok(config) => Ctx::from_config(&config),
        Err(_) => {
            println!("no API keys found; running without clients so the span shows a failing step");
            Ctx::new()
        }
    };

    // The hook fires mid-run while the span is not in scope yet, so buffer
    // the events and attach them afterwards.
    let events: Arc<Mutex<Vec<(String, String, f64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);

    let pipeline = build_chained_pipeline().unwrap();
    let mut runner = Runner::new(pipeline).on_step(move |e| {
        sink.lock().unwrap().push((
            e.step.to_string(),
            format!("{:?}", e.outcome),
            e.duration.as_secs_f64(),
        ));
    });

    tracer.in_span("chained-outreach", |cx| {
        let span = cx.span();
        span.set_attribute(KeyValue::new("linkedin.url", QUICK_TEST_URL));

        let result = runner.run(OutreachState::new(QUICK_TEST_URL), &mut ctx);
        match &result {
            Ok(state) => {
                let chars = state.message.as_deref().unwrap_or_default().len();
                span.set_attribute(KeyValue::new("outreach.message_chars", chars as i64));
            }
            Err(err) => {
                span.set_attribute(KeyValue::new("outreach.error", err.to_string()));
            }
        }

        for (step, outcome, seconds) in events.lock().unwrap().drain(..) {
            span.add_event(
                "step",
                vec![
                    KeyValue::new("step.name", step),
                    KeyValue::new("step.outcome", outcome),
                    KeyValue::new("step.seconds", seconds),
                ],
            );
        }
    });

    if let Err(err) = provider.shutdown() {
        eprintln!("exporter shutdown failed: {err}");
    }
}
