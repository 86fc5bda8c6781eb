//! Agentic workflow demo: same URLs as the chained demo, but the model
//! recovers from the broken one by correcting it through tool feedback.

use std::process;

use outreach_line::cases::DEMO_PAIR;
use outreach_line::display;
use outreach_line::outreach::{build_outreach_conversation, run_agentic};
use outreach_line::{Config, Ctx};

fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            eprintln!("copy .env.example to .env and fill in the API keys");
            process::exit(1);
        }
    };
    let ctx = Ctx::from_config(&config);

    for case in DEMO_PAIR {
        display::section(&format!("TEST: {}", case.label));
        display::banner("AGENTIC WORKFLOW");
        println!("URL: {}", case.url);

        // Fresh conversation per case so attempts don't leak between runs.
        let mut convo = match build_outreach_conversation(&ctx) {
            Ok(convo) => convo.on_event(display::render_event),
            Err(err) => {
                eprintln!("{err}");
                process::exit(1);
            }
        };

        let report = run_agentic(&mut convo, case.url);
        display::print_report(&report);

        println!("\nSESSION METRICS:");
        println!("{}", display::metrics_summary(&report.metrics));
    }
}
