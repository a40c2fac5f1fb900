//! Terminal rendition of the contact form.
//!
//! `contact-form` walks the visitor through the form and submits it.
//! `contact-form leads` prints the locally saved leads when `CONTACT_DEBUG` is set.

use std::sync::Arc;

use contact_form_service::client::{
    ClientConfig, ContactApi, FileKeyValueStore, HttpContactApi, LeadLog, SubmissionFlow,
    SubmitOutcome,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ClientConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let api: Option<Arc<dyn ContactApi>> = match &config.api_url {
        Some(url) => Some(Arc::new(HttpContactApi::new(url.as_str(), config.timeout)?)),
        None => {
            tracing::info!("No CONTACT_API_URL configured, submissions are saved locally only");
            None
        }
    };
    let leads = LeadLog::new(Arc::new(FileKeyValueStore::new(&config.leads_file)));
    let mut flow = SubmissionFlow::new(api, leads).with_debug(config.debug);

    if std::env::args().nth(1).as_deref() == Some("leads") {
        return print_leads(&flow);
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("Contact us");
    println!("Fields marked * are required. Press Enter to keep the value in brackets.");

    loop {
        if !fill_form(&mut flow, &mut input).await? {
            break;
        }

        let outcome = flow.submit().await;
        println!();
        println!("{}", outcome.notice());

        match outcome {
            SubmitOutcome::Blocked(_) | SubmitOutcome::Error(_) => {
                if !confirm(&mut input, "Try again? [Y/n] ", true).await? {
                    break;
                }
            }
            SubmitOutcome::Success(_) | SubmitOutcome::LocalFallback(_) => {
                if !confirm(&mut input, "Send another message? [y/N] ", false).await? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Prompt for every field and the captcha. Returns `false` on end of input.
async fn fill_form(flow: &mut SubmissionFlow, input: &mut Input) -> anyhow::Result<bool> {
    let current = flow.form().clone();
    let prompts = [
        ("Name *", current.name),
        ("Email *", current.email),
        ("Phone", current.phone),
        ("Subject *", current.subject),
        ("Message *", current.message),
    ];

    let mut values = Vec::with_capacity(prompts.len());
    for (label, existing) in prompts {
        match prompt(input, label, &existing).await? {
            Some(value) => values.push(value),
            None => return Ok(false),
        }
    }

    let form = flow.form_mut();
    let mut values = values.into_iter();
    form.name = values.next().unwrap_or_default();
    form.email = values.next().unwrap_or_default();
    form.phone = values.next().unwrap_or_default();
    form.subject = values.next().unwrap_or_default();
    form.message = values.next().unwrap_or_default();

    let question = flow.captcha().question();
    match prompt(input, &question, "").await? {
        Some(answer) => flow.set_captcha_answer(answer),
        None => return Ok(false),
    }

    Ok(true)
}

async fn prompt(input: &mut Input, label: &str, existing: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    let line = if existing.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, existing)
    };
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;

    Ok(input.next_line().await?.map(|value| {
        if value.trim().is_empty() {
            existing.to_string()
        } else {
            value
        }
    }))
}

async fn confirm(input: &mut Input, question: &str, default: bool) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(question.as_bytes()).await?;
    stdout.flush().await?;

    Ok(match input.next_line().await?.as_deref().map(str::trim) {
        None => false,
        Some("") => default,
        Some(answer) => answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"),
    })
}

fn print_leads(flow: &SubmissionFlow) -> anyhow::Result<()> {
    let Some(leads) = flow.view_all_leads() else {
        anyhow::bail!("Set CONTACT_DEBUG=true to inspect locally saved leads");
    };

    println!("{}", serde_json::to_string_pretty(&leads)?);
    println!("{} lead(s) saved locally", leads.len());
    Ok(())
}
