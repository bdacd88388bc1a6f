//! CLI entry point for `emlview`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};

use emlview::i18n;
use emlview::model::email::ParsedEmail;
use emlview::parser::eml::parse_eml_file;

#[derive(Parser)]
#[command(name = "emlview", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// .eml file to display
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, ja). Defaults to system locale.
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a decoded email
    Show {
        path: PathBuf,
    },
    /// Output the parsed email as JSON
    Json {
        path: PathBuf,
    },
    /// Save all attachments to a directory
    Attachments {
        path: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Detect language early from --lang arg or system env, before clap processes --help.
fn detect_lang_early() -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--lang" {
            if let Some(code) = args.get(i + 1) {
                if let Some(lang) = i18n::Lang::from_code(code) {
                    return lang;
                }
            }
        }
        if let Some(code) = args[i].strip_prefix("--lang=") {
            if let Some(lang) = i18n::Lang::from_code(code) {
                return lang;
            }
        }
    }
    i18n::detect_system_lang()
}

/// Build a localized clap Command using i18n strings.
fn build_localized_command() -> clap::Command {
    let mut cmd = Cli::command();
    cmd = cmd
        .about(i18n::app_about())
        .long_about(i18n::app_long_about());

    let subcommands: Vec<clap::Command> = cmd
        .get_subcommands()
        .map(|sub| {
            let mut s = sub.clone();
            match s.get_name() {
                "show" => {
                    s = s.about(i18n::help_cmd_show());
                }
                "json" => {
                    s = s.about(i18n::help_cmd_json());
                }
                "attachments" => {
                    s = s.about(i18n::help_cmd_attachments());
                }
                "completions" => {
                    s = s.about(i18n::help_cmd_completions());
                }
                "manpage" => {
                    s = s.about(i18n::help_cmd_manpage());
                }
                _ => {}
            }
            s
        })
        .collect();

    for sub in subcommands {
        cmd = cmd.mut_subcommand(sub.get_name(), |_| sub.clone());
    }

    cmd
}

fn main() -> anyhow::Result<()> {
    // Detect language BEFORE clap parsing so --help is localized
    let lang = detect_lang_early();
    i18n::set_lang(lang);

    let cmd = build_localized_command();
    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let config = emlview::config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Some(Commands::Show { path }) => cmd_show(&path, &config),
        Some(Commands::Json { path }) => cmd_json(&path),
        Some(Commands::Attachments { path, output }) => {
            cmd_attachments(&path, output.as_deref(), &config)
        }
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
        None => {
            if let Some(path) = cli.file {
                cmd_show(&path, &config)
            } else {
                eprintln!("{}", i18n::err_no_file_given());
                Ok(())
            }
        }
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &emlview::config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = emlview::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "emlview.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Parse an `.eml` file, mapping any failure onto the single generic
/// localized message (the cause goes to the log).
fn load_email(path: &Path) -> anyhow::Result<ParsedEmail> {
    if !path.exists() {
        anyhow::bail!("{}: {}", i18n::err_file_not_found(), path.display());
    }
    match parse_eml_file(path) {
        Ok(email) => Ok(email),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse email");
            anyhow::bail!("{}", i18n::err_parse_failed());
        }
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "emlview", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Display a decoded email as formatted text.
fn cmd_show(path: &Path, config: &emlview::config::Config) -> anyhow::Result<()> {
    let email = load_email(path)?;

    println!();
    print_header_line(i18n::label_subject(), &email.subject);
    print_header_line(i18n::label_from(), &email.from);
    print_header_line(i18n::label_to(), &email.to_line());
    print_header_line(i18n::label_date(), &email.date);
    println!();

    if email.text.is_empty() {
        println!("  {}", i18n::msg_no_text_content());
    } else {
        for line in email.text.lines() {
            println!("  {line}");
        }
    }

    if email.html.is_some() {
        println!();
        println!("  {}", i18n::msg_html_present());
    }

    println!();
    if email.attachments.is_empty() {
        println!("  {}", i18n::msg_no_attachments());
    } else {
        print_attachment_table(&email, config);
    }
    println!();

    Ok(())
}

/// Output the parsed email as pretty-printed JSON.
fn cmd_json(path: &Path) -> anyhow::Result<()> {
    let email = load_email(path)?;
    println!("{}", serde_json::to_string_pretty(&email)?);
    Ok(())
}

/// Save every attachment to a directory.
fn cmd_attachments(
    path: &Path,
    output: Option<&Path>,
    config: &emlview::config::Config,
) -> anyhow::Result<()> {
    let email = load_email(path)?;

    if email.attachments.is_empty() {
        println!("  {}", i18n::msg_no_attachments());
        return Ok(());
    }

    let output_dir = output
        .map(Path::to_path_buf)
        .or_else(|| config.export.default_output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let paths = emlview::export::attachment::save_all_attachments(&email, &output_dir)?;
    for p in &paths {
        println!("  {} {}", i18n::msg_saved(), p.display());
    }
    println!();
    println!(
        "  {}: {}/{}",
        i18n::label_attachments(),
        paths.len(),
        email.attachments.len()
    );

    Ok(())
}

/// Print one `Label:   value` line with the label padded to a fixed
/// display width (Japanese labels are wider than their char count).
fn print_header_line(label: &str, value: &str) {
    use unicode_width::UnicodeWidthStr;

    let pad = 10usize.saturating_sub(label.width() + 1);
    println!("  {label}:{} {value}", " ".repeat(pad));
}

/// Print the attachment table: filename, media type, human-readable size.
fn print_attachment_table(email: &ParsedEmail, config: &emlview::config::Config) {
    use humansize::{format_size, BINARY};

    let name_w = config.display.filename_width;
    let type_w = config.display.type_width;

    println!("  {} ({})", i18n::label_attachments(), email.attachments.len());
    println!(
        "  {} {} {:>9}",
        pad_display(i18n::col_filename(), name_w),
        pad_display(i18n::col_type(), type_w),
        i18n::col_size()
    );
    println!("  {}", "-".repeat(name_w + type_w + 11));

    for att in &email.attachments {
        println!(
            "  {} {} {:>9}",
            pad_display(&truncate_display(&att.filename, name_w), name_w),
            pad_display(&truncate_display(&att.content_type, type_w), type_w),
            format_size(att.size as u64, BINARY)
        );
    }
}

/// Truncate a string to at most `max` display columns (CJK-aware).
fn truncate_display(s: &str, max: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max {
            break;
        }
        width += w;
        out.push(c);
    }
    out
}

/// Pad a string with spaces to exactly `width` display columns.
fn pad_display(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}
