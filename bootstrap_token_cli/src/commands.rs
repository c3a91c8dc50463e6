//! Subcommand execution
//!
//! Every command writes its result to `out` and reports whether all inputs
//! passed. Secrets only reach the output when `reveal_secret` is set, and they
//! never reach the log.

use crate::cli::Command;
use crate::input::{self, Candidate};
use bootstrap_token::{decode_json, encode_json, BootstrapToken};
use log::{debug, info, warn};
use serde::Serialize;
use std::error::Error;
use std::io::{Read, Write};
use std::path::Path;

pub type CommandResult = Result<bool, Box<dyn Error>>;

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
    pub reveal_secret: bool,
}

impl OutputOptions {
    fn secret_of(&self, token: &BootstrapToken) -> String {
        if self.reveal_secret {
            token.secret().to_string()
        } else {
            "*".repeat(token.secret().len())
        }
    }

    fn display(&self, token: &BootstrapToken) -> String {
        if self.reveal_secret {
            token.to_string()
        } else {
            token.redacted()
        }
    }
}

#[derive(Debug, Serialize)]
struct ValidationRecord {
    source: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct TokenParts {
    id: String,
    secret: String,
}

#[derive(Debug, Serialize)]
struct TokenOutput {
    id: String,
    token: String,
}

/// Run a parsed subcommand
pub fn execute<R: Read, W: Write>(
    command: &Command,
    options: &OutputOptions,
    stdin: R,
    out: &mut W,
) -> CommandResult {
    match command {
        Command::Validate { tokens, file } => {
            let candidates = collect_candidates(tokens, file.as_deref(), stdin)?;
            validate(&candidates, options, out)
        }
        Command::Split { token } => split(token, options, out),
        Command::Join { id, secret } => join(id, secret, options, out),
        Command::Encode { token } => encode(token, out),
        Command::Decode { path } => {
            let bytes = match path.as_deref() {
                Some(p) if p != Path::new("-") => input::read_file(p)?,
                _ => input::read_bounded(stdin, "stdin")?,
            };
            decode(&bytes, options, out)
        }
    }
}

fn collect_candidates<R: Read>(
    tokens: &[String],
    file: Option<&Path>,
    stdin: R,
) -> Result<Vec<Candidate>, Box<dyn Error>> {
    let mut candidates = Vec::new();
    let mut stdin = Some(stdin);

    for (index, raw) in tokens.iter().enumerate() {
        if raw == "-" {
            // stdin can only be drained once
            if let Some(reader) = stdin.take() {
                let bytes = input::read_bounded(reader, "stdin")?;
                candidates.extend(input::token_lines(&bytes, "stdin")?);
            }
            continue;
        }
        candidates.push(Candidate {
            source: format!("arg {}", index + 1),
            raw: raw.clone(),
        });
    }

    if let Some(path) = file {
        let bytes = input::read_file(path)?;
        candidates.extend(input::token_lines(&bytes, &path.display().to_string())?);
    }

    if candidates.is_empty() {
        return Err("no tokens given; pass tokens as arguments, '-' for stdin, or --file".into());
    }

    Ok(candidates)
}

fn validate<W: Write>(
    candidates: &[Candidate],
    options: &OutputOptions,
    out: &mut W,
) -> CommandResult {
    let mut records = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let record = match BootstrapToken::parse(&candidate.raw) {
            Ok(token) => {
                debug!("{}: valid token id={}", candidate.source, token.id());
                ValidationRecord {
                    source: candidate.source.clone(),
                    valid: true,
                    id: Some(token.id().to_string()),
                    code: None,
                    message: None,
                }
            }
            Err(err) => {
                warn!("{}: {}", candidate.source, err.code());
                ValidationRecord {
                    source: candidate.source.clone(),
                    valid: false,
                    id: None,
                    code: Some(err.code()),
                    message: Some(err.to_string()),
                }
            }
        };
        records.push(record);
    }

    let passed = records.iter().filter(|r| r.valid).count();
    info!("validated {} tokens, {} passed", records.len(), passed);

    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
    } else {
        for record in &records {
            match (&record.id, record.code, &record.message) {
                (Some(id), _, _) => writeln!(out, "ok\t{}\t{}", record.source, id)?,
                (None, Some(code), Some(message)) => {
                    writeln!(out, "{}\t{}\t{}", code, record.source, message)?
                }
                _ => writeln!(out, "unknown\t{}", record.source)?,
            }
        }
    }

    Ok(passed == records.len())
}

fn split<W: Write>(raw: &str, options: &OutputOptions, out: &mut W) -> CommandResult {
    let token = BootstrapToken::parse(raw)?;
    debug!("split token id={}", token.id());

    let parts = TokenParts {
        id: token.id().to_string(),
        secret: options.secret_of(&token),
    };

    if options.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&parts)?)?;
    } else {
        writeln!(out, "id:     {}", parts.id)?;
        writeln!(out, "secret: {}", parts.secret)?;
    }

    Ok(true)
}

fn join<W: Write>(id: &str, secret: &str, options: &OutputOptions, out: &mut W) -> CommandResult {
    let token = BootstrapToken::new(id, secret)?;
    debug!("joined token id={}", token.id());

    if options.json {
        let output = TokenOutput {
            id: token.id().to_string(),
            token: token.to_string(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(out, "{}", token)?;
    }

    Ok(true)
}

fn encode<W: Write>(raw: &str, out: &mut W) -> CommandResult {
    let token = BootstrapToken::parse(raw)?;
    debug!("encoding token id={}", token.id());

    let encoded = encode_json(&token)?;
    out.write_all(&encoded)?;
    writeln!(out)?;

    Ok(true)
}

fn decode<W: Write>(bytes: &[u8], options: &OutputOptions, out: &mut W) -> CommandResult {
    let token = decode_json(bytes)?;
    debug!("decoded token id={}", token.id());

    if options.json {
        let output = TokenOutput {
            id: token.id().to_string(),
            token: options.display(&token),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(out, "{}", options.display(&token))?;
    }

    Ok(true)
}
