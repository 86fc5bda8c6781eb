//! Chained workflow demo: clean URL succeeds, broken URL fails hard.

use std::process;

use outreach_line::cases::DEMO_PAIR;
use outreach_line::display;
use outreach_line::outreach::chained_outreach;
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
    let mut ctx = Ctx::from_config(&config);

    for case in DEMO_PAIR {
        display::section(&format!("TEST: {}", case.label));
        display::banner("CHAINED WORKFLOW");
        println!("URL: {}", case.url);
        println!();

        let report = chained_outreach(&mut ctx, case.url);
        for line in ctx.logs() {
            println!("{line}");
        }
        ctx.clear_logs();

        display::print_report(&report);
    }
}
