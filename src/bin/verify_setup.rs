//! Setup checker: env file, API keys, and a live ping to the messages API.
//!
//! Exits non-zero when any check fails, so it can gate scripts.

use std::path::Path;
use std::process;

use outreach_line::config;
use outreach_line::display;
use outreach_line::{Config, Ctx};

struct Checks {
    passed: u32,
    total: u32,
}

impl Checks {
    fn new() -> Self {
        Self { passed: 0, total: 0 }
    }

    fn pass(&mut self, msg: &str) {
        self.passed += 1;
        self.total += 1;
        println!("   ✓ {msg}");
    }

    fn fail(&mut self, msg: &str, hint: &str) {
        self.total += 1;
        println!("   ✗ {msg}");
        println!("     fix: {hint}");
    }
}

fn main() {
    println!("VERIFYING SETUP");
    println!("{}", display::rule());

    let mut checks = Checks::new();

    if Path::new(".env").exists() {
        checks.pass(".env file found");
    } else {
        checks.fail(
            ".env file not found",
            "copy .env.example to .env (exported env vars work too)",
        );
    }

    let config = match Config::from_env() {
        Ok(config) => {
            checks.pass(&format!(
                "ANTHROPIC_API_KEY set ({})",
                config::mask(&config.anthropic_api_key)
            ));
            if config.anthropic_api_key.starts_with("sk-ant-") {
                checks.pass("ANTHROPIC_API_KEY has the expected sk-ant- prefix");
            } else {
                checks.fail(
                    "ANTHROPIC_API_KEY does not start with sk-ant-",
                    "double-check the key in .env",
                );
            }
            checks.pass(&format!(
                "ENRICHLAYER_API_KEY set ({})",
                config::mask(&config.enrichlayer_api_key)
            ));
            checks.pass(&format!("model: {}", config.model));
            Some(config)
        }
        Err(err) => {
            checks.fail(&err.to_string(), "set the variable in .env");
            None
        }
    };

    // Live ping only once the keys look right; a garbage key would just
    // burn the check.
    if checks.passed == checks.total {
        if let Some(config) = config {
            let ctx = Ctx::from_config(&config);
            match ctx.llm().user("Hi").max_tokens(10).send() {
                Ok(_) => checks.pass("messages API reachable"),
                Err(err) => checks.fail(
                    &format!("messages API ping failed: {err}"),
                    "check the key and your network",
                ),
            }
        }
    } else {
        println!("   - skipping live API ping until the checks above pass");
    }

    println!("{}", display::rule());
    println!("{}/{} checks passed", checks.passed, checks.total);
    process::exit(if checks.passed == checks.total { 0 } else { 1 });
}
