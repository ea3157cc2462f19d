use anyhow::{Context, Result, bail};
use codepaste_config::Config;
use codepaste_engine::{
    Attachment, AttachmentSource, Author, BuiltinLanguages, CollabError, DeletionMode,
    DestinationId, Message, PasteRequest, PasteSink, PastingService,
};
use std::{
    env, fs,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "Usage: codepaste-cli [--config PATH] [--guild ID] [--channel ID] \
[--attach PATH[:MIME]]... [--paste delete|keep|auto] <MESSAGE_FILE|->";

#[derive(Debug, PartialEq)]
struct Args {
    config_path: Option<PathBuf>,
    guild: u64,
    channel: u64,
    attachments: Vec<Attachment>,
    paste: Option<DeletionMode>,
    message: String,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut args = args.into_iter();
    let mut config_path = None;
    let mut guild = 0;
    let mut channel = 0;
    let mut attachments = vec![];
    let mut paste = None;
    let mut message = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config_path = Some(PathBuf::from(value(&mut args, "--config")?)),
            "--guild" => {
                guild = value(&mut args, "--guild")?
                    .parse()
                    .context("--guild expects a numeric ID")?
            }
            "--channel" => {
                channel = value(&mut args, "--channel")?
                    .parse()
                    .context("--channel expects a numeric ID")?
            }
            "--attach" => attachments.push(attachment_arg(&value(&mut args, "--attach")?)),
            "--paste" => paste = Some(value(&mut args, "--paste")?.parse()?),
            flag if flag.starts_with("--") => bail!("unknown option: {flag}"),
            _ if message.is_none() => message = Some(arg),
            _ => bail!("unexpected argument: {arg}"),
        }
    }

    Ok(Args {
        config_path,
        guild,
        channel,
        attachments,
        paste,
        message: message.context("no message file given")?,
    })
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} expects a value"))
}

/// `path` or `path:mime/type`; the MIME type defaults to `text/plain`.
fn attachment_arg(spec: &str) -> Attachment {
    let (path, mime) = match spec.rsplit_once(':') {
        Some((path, mime)) if mime.contains('/') => (path, mime),
        _ => (spec, "text/plain"),
    };
    let filename = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path);
    Attachment::new(filename, mime, path)
}

/// Reads attachment bodies from local files; the attachment URL is the path.
struct LocalFiles;

impl AttachmentSource for LocalFiles {
    fn fetch(&self, attachment: &Attachment) -> Result<String, CollabError> {
        Ok(fs::read_to_string(&attachment.url)?)
    }
}

/// Prints the paste instead of submitting it.
struct DryRunSink;

impl PasteSink for DryRunSink {
    fn create_paste(&self, request: &PasteRequest) -> Result<String, CollabError> {
        let rendered =
            toml::to_string_pretty(request).map_err(|e| CollabError::Rejected(e.to_string()))?;
        println!("{rendered}");
        Ok(format!("dry-run://{}-units", request.units.len()))
    }
}

fn read_message(source: &str) -> Result<String> {
    if source == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read message from stdin")?;
        return Ok(content);
    }
    fs::read_to_string(source).with_context(|| format!("Failed to read message file {source}"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let config_path = args.config_path.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from_path(&config_path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let rules = config.for_guild(args.guild);

    let author = Author::new(0, env::var("USER").unwrap_or_else(|_| "codepaste".to_string()));
    let message = Message {
        author,
        channel: DestinationId(args.channel),
        content: read_message(&args.message)?,
        attachments: args.attachments,
    };

    let service = PastingService::new(&LocalFiles, &BuiltinLanguages, &DryRunSink);
    let outcome = match args.paste {
        Some(mode) => service.paste_on_request(&message, &message.author, &rules, mode)?,
        None => service.auto_paste(&message, &rules)?,
    };

    match outcome {
        Some(outcome) => {
            println!("{}", outcome.reply);
            let action = if outcome.delete_source { "delete" } else { "keep" };
            println!("source message: {action}");
        }
        None => println!("Nothing qualifies for pasting"),
    }

    Ok(())
}
