use std::io::Write as _;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use crate::{
    classifier::{ClassifierClient, SubmitError},
    config::AppConfig,
    controller::{validate_url, RequestToken, SubmissionController},
    domain::PredictionResult,
    render::render,
};

type Outcome = (RequestToken, Result<PredictionResult, SubmitError>);

#[derive(Parser, Debug)]
#[command(
    name = "phishguard",
    version,
    about = "Checks URLs against a phishing classification service"
)]
pub struct Cli {
    #[arg(help = "Check this URL once and exit instead of starting the interactive session")]
    pub url: Option<String>,
    #[arg(long, requires = "url", help = "Output the one-shot result as JSON")]
    pub json: bool,
}

pub struct PhishGuardApp {
    client: Arc<ClassifierClient>,
}

impl PhishGuardApp {
    pub fn initialize(config: AppConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(format!("phishguard/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let client = Arc::new(ClassifierClient::new(http, config.endpoint.clone()));
        Ok(Self { client })
    }

    /// Single check, print, exit. Validation and rendering rules match the
    /// interactive session.
    pub async fn check_once(&self, url: &str, json: bool) -> Result<()> {
        let url = validate_url(url).map_err(anyhow::Error::new)?;
        let prediction = self.client.classify(url).await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&prediction)?);
            return Ok(());
        }

        println!("Checked URL: {url}");
        println!("Result: {}", prediction.verdict);
        if prediction.is_phishing() && !prediction.reasons.is_empty() {
            println!("Reasons:");
            for reason in &prediction.reasons {
                println!("  - {reason}");
            }
        }
        Ok(())
    }

    /// Interactive session: a single-threaded event loop over stdin lines,
    /// classification outcomes and ctrl-c. Each submit runs as its own task
    /// so the loop stays responsive while a request is in flight; outcomes
    /// come back over the channel tagged with their request token and the
    /// controller discards any that a newer submission superseded.
    pub async fn run(self) -> Result<()> {
        println!("phishguard {} — phishing URL check", env!("CARGO_PKG_VERSION"));
        println!("Enter a URL to check it. Commands: /details  /reset  /quit");

        let mut controller = SubmissionController::new();
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<Outcome>();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        prompt()?;
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupt received; exiting");
                    break;
                }
                line = lines.next_line() => {
                    match line? {
                        None => break,
                        Some(line) => {
                            if !self.handle_line(line.trim(), &mut controller, &outcome_tx) {
                                break;
                            }
                            prompt()?;
                        }
                    }
                }
                Some((token, outcome)) = outcome_rx.recv() => {
                    if controller.apply_outcome(token, outcome) {
                        print!("{}", render(controller.state()));
                        prompt()?;
                    }
                }
            }
        }

        tracing::info!("session ended");
        Ok(())
    }

    fn handle_line(
        &self,
        line: &str,
        controller: &mut SubmissionController,
        outcome_tx: &mpsc::UnboundedSender<Outcome>,
    ) -> bool {
        match line {
            "" => true,
            "/quit" | "/exit" => false,
            "/reset" => {
                controller.reset();
                println!("(cleared)");
                true
            }
            "/details" => {
                controller.toggle_details();
                print!("{}", render(controller.state()));
                true
            }
            input => {
                match controller.begin_submit(input) {
                    Err(err) => println!("[!] {err}"),
                    Ok((token, url)) => {
                        print!("{}", render(controller.state()));
                        let client = self.client.clone();
                        let outcome_tx = outcome_tx.clone();
                        tokio::spawn(async move {
                            let outcome = client.classify(&url).await;
                            let _ = outcome_tx.send((token, outcome));
                        });
                    }
                }
                true
            }
        }
    }
}

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_args_selects_interactive_mode() {
        let cli = Cli::try_parse_from(["phishguard"]).unwrap();
        assert_eq!(cli.url, None);
        assert!(!cli.json);
    }

    #[test]
    fn url_and_json_flag_parse_in_any_order() {
        for argv in [
            ["phishguard", "--json", "http://example.com"],
            ["phishguard", "http://example.com", "--json"],
        ] {
            let cli = Cli::try_parse_from(argv).unwrap();
            assert_eq!(cli.url.as_deref(), Some("http://example.com"));
            assert!(cli.json);
        }
    }

    #[test]
    fn duplicate_json_flag_is_rejected() {
        let err =
            Cli::try_parse_from(["phishguard", "--json", "--json", "http://a.com"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn json_without_url_is_rejected() {
        let err = Cli::try_parse_from(["phishguard", "--json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn multiple_urls_are_rejected() {
        assert!(Cli::try_parse_from(["phishguard", "http://a.com", "http://b.com"]).is_err());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let err = Cli::try_parse_from(["phishguard", "--verbose", "http://a.com"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_renders_usage() {
        let err = Cli::try_parse_from(["phishguard", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(err.to_string().contains("Usage"));
    }
}
