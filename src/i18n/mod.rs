//! Internationalization (i18n) module.
//!
//! Provides localized strings for the application UI and CLI output.
//! English is the default language; Japanese is available as an alternative
//! (the header labels follow the conventions of Japanese mail clients).
//! The architecture supports adding more languages in the future.

use std::sync::OnceLock;

static CURRENT_LANG: OnceLock<Lang> = OnceLock::new();

/// Supported languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    /// English (default)
    En,
    /// Japanese
    Ja,
}

impl Lang {
    /// Parse a language code string (e.g. "en", "ja", "en_US", "ja_JP").
    /// Returns `None` for unrecognized codes.
    pub fn from_code(code: &str) -> Option<Self> {
        let normalized = code.to_lowercase();
        let prefix = normalized.split(['_', '-']).next().unwrap_or("");
        match prefix {
            "en" => Some(Self::En),
            "ja" => Some(Self::Ja),
            _ => None,
        }
    }

    /// Return the ISO 639-1 code for this language.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }
}

/// Initialize the global language. Call once at startup.
/// If already initialized, this is a no-op.
pub fn set_lang(lang: Lang) {
    let _ = CURRENT_LANG.set(lang);
}

/// Get the currently configured language (defaults to English).
pub fn lang() -> Lang {
    CURRENT_LANG.get().copied().unwrap_or(Lang::En)
}

/// Detect language from the `LANG` / `LC_MESSAGES` environment variables.
pub fn detect_system_lang() -> Lang {
    std::env::var("EMLVIEW_LANG")
        .ok()
        .and_then(|v| Lang::from_code(&v))
        .or_else(|| {
            std::env::var("LC_MESSAGES")
                .ok()
                .and_then(|v| Lang::from_code(&v))
        })
        .or_else(|| std::env::var("LANG").ok().and_then(|v| Lang::from_code(&v)))
        .unwrap_or(Lang::En)
}

/// Macro for defining translatable message functions.
/// Each function returns a `&'static str` based on the current language.
macro_rules! msg {
    ($name:ident, $en:expr, $ja:expr) => {
        /// Returns a localized string for the current language.
        pub fn $name() -> &'static str {
            match lang() {
                Lang::En => $en,
                Lang::Ja => $ja,
            }
        }
    };
}

// ── General ──────────────────────────────────────────────────────

msg!(app_name, "emlview", "emlview");
msg!(
    app_about,
    "emlview \u{2014} Terminal viewer for .eml email files. Decodes MIME headers, bodies and attachments, including Japanese encodings (ISO-2022-JP, Shift-JIS, EUC-JP).",
    "emlview \u{2014} .eml\u{30e1}\u{30fc}\u{30eb}\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{306e}\u{30bf}\u{30fc}\u{30df}\u{30ca}\u{30eb}\u{30d3}\u{30e5}\u{30fc}\u{30a2}\u{3002}MIME\u{30d8}\u{30c3}\u{30c0}\u{30fc}\u{30fb}\u{672c}\u{6587}\u{30fb}\u{6dfb}\u{4ed8}\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{3092}\u{30c7}\u{30b3}\u{30fc}\u{30c9}\u{ff08}ISO-2022-JP\u{3001}Shift-JIS\u{3001}EUC-JP\u{5bfe}\u{5fdc}\u{ff09}\u{3002}"
);
msg!(
    app_long_about,
    "emlview \u{2014} Terminal viewer for .eml email files.\nDecodes folded and RFC 2047-encoded headers, base64 and quoted-printable\nbodies, multipart messages with attachments, and common Japanese encodings.",
    "emlview \u{2014} .eml\u{30e1}\u{30fc}\u{30eb}\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{306e}\u{30bf}\u{30fc}\u{30df}\u{30ca}\u{30eb}\u{30d3}\u{30e5}\u{30fc}\u{30a2}\u{3002}\n\u{6298}\u{308a}\u{8fd4}\u{3057}\u{30fb}RFC 2047\u{30a8}\u{30f3}\u{30b3}\u{30fc}\u{30c9}\u{3055}\u{308c}\u{305f}\u{30d8}\u{30c3}\u{30c0}\u{30fc}\u{3001}base64\u{3068}quoted-printable\u{306e}\u{672c}\u{6587}\u{3001}\n\u{6dfb}\u{4ed8}\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{4ed8}\u{304d}\u{30de}\u{30eb}\u{30c1}\u{30d1}\u{30fc}\u{30c8}\u{3001}\u{65e5}\u{672c}\u{8a9e}\u{306e}\u{4e3b}\u{8981}\u{306a}\u{6587}\u{5b57}\u{30b3}\u{30fc}\u{30c9}\u{306b}\u{5bfe}\u{5fdc}\u{3002}"
);

// ── CLI help strings ─────────────────────────────────────────────

msg!(
    help_file_arg,
    ".eml file to display (shortcut for 'show' command)",
    "\u{8868}\u{793a}\u{3059}\u{308b}.eml\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{ff08}'show'\u{30b3}\u{30de}\u{30f3}\u{30c9}\u{306e}\u{30b7}\u{30e7}\u{30fc}\u{30c8}\u{30ab}\u{30c3}\u{30c8}\u{ff09}"
);
msg!(
    help_verbose,
    "Verbose logging (-v info, -vv debug, -vvv trace)",
    "\u{8a73}\u{7d30}\u{30ed}\u{30b0}\u{51fa}\u{529b}\u{ff08}-v info\u{3001}-vv debug\u{3001}-vvv trace\u{ff09}"
);
msg!(
    help_lang,
    "Language (en, ja). Defaults to system locale",
    "\u{8a00}\u{8a9e}\u{ff08}en\u{3001}ja\u{ff09}\u{3002}\u{30c7}\u{30d5}\u{30a9}\u{30eb}\u{30c8}\u{306f}\u{30b7}\u{30b9}\u{30c6}\u{30e0}\u{30ed}\u{30b1}\u{30fc}\u{30eb}"
);
msg!(
    help_cmd_show,
    "Display a decoded email (default if no subcommand given)",
    "\u{30c7}\u{30b3}\u{30fc}\u{30c9}\u{3057}\u{305f}\u{30e1}\u{30fc}\u{30eb}\u{3092}\u{8868}\u{793a}\u{ff08}\u{30b5}\u{30d6}\u{30b3}\u{30de}\u{30f3}\u{30c9}\u{7701}\u{7565}\u{6642}\u{306e}\u{30c7}\u{30d5}\u{30a9}\u{30eb}\u{30c8}\u{ff09}"
);
msg!(
    help_cmd_json,
    "Output the parsed email as JSON",
    "\u{89e3}\u{6790}\u{7d50}\u{679c}\u{3092}JSON\u{3067}\u{51fa}\u{529b}"
);
msg!(
    help_cmd_attachments,
    "Save all attachments to a directory",
    "\u{3059}\u{3079}\u{3066}\u{306e}\u{6dfb}\u{4ed8}\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{3092}\u{30c7}\u{30a3}\u{30ec}\u{30af}\u{30c8}\u{30ea}\u{306b}\u{4fdd}\u{5b58}"
);
msg!(
    help_cmd_completions,
    "Generate shell completions",
    "\u{30b7}\u{30a7}\u{30eb}\u{88dc}\u{5b8c}\u{30b9}\u{30af}\u{30ea}\u{30d7}\u{30c8}\u{3092}\u{751f}\u{6210}"
);
msg!(
    help_cmd_manpage,
    "Generate a man page",
    "man\u{30da}\u{30fc}\u{30b8}\u{3092}\u{751f}\u{6210}"
);
msg!(
    help_output_dir,
    "Output directory for saved attachments",
    "\u{6dfb}\u{4ed8}\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{306e}\u{51fa}\u{529b}\u{5148}\u{30c7}\u{30a3}\u{30ec}\u{30af}\u{30c8}\u{30ea}"
);

// ── Header labels (show view) ────────────────────────────────────

msg!(label_subject, "Subject", "\u{4ef6}\u{540d}");
msg!(label_from, "From", "\u{5dee}\u{51fa}\u{4eba}");
msg!(label_to, "To", "\u{5b9b}\u{5148}");
msg!(label_date, "Date", "\u{65e5}\u{4ed8}");
msg!(
    label_attachments,
    "Attachments",
    "\u{6dfb}\u{4ed8}\u{30d5}\u{30a1}\u{30a4}\u{30eb}"
);

// ── Show view content ────────────────────────────────────────────

msg!(
    msg_no_text_content,
    "(No text content)",
    "\u{ff08}\u{30c6}\u{30ad}\u{30b9}\u{30c8}\u{672c}\u{6587}\u{306a}\u{3057}\u{ff09}"
);
msg!(
    msg_html_present,
    "This message also carries an HTML body (not rendered; use 'json' to access it).",
    "\u{3053}\u{306e}\u{30e1}\u{30fc}\u{30eb}\u{306b}\u{306f}HTML\u{672c}\u{6587}\u{3082}\u{3042}\u{308a}\u{307e}\u{3059}\u{ff08}\u{8868}\u{793a}\u{3055}\u{308c}\u{307e}\u{305b}\u{3093}\u{3002}'json'\u{3067}\u{53d6}\u{5f97}\u{3067}\u{304d}\u{307e}\u{3059}\u{ff09}\u{3002}"
);
msg!(
    msg_no_attachments,
    "No attachments",
    "\u{6dfb}\u{4ed8}\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{306a}\u{3057}"
);
msg!(msg_saved, "Saved", "\u{4fdd}\u{5b58}\u{3057}\u{307e}\u{3057}\u{305f}");

// ── Column headers ───────────────────────────────────────────────

msg!(col_filename, "Filename", "\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{540d}");
msg!(col_type, "Type", "\u{7a2e}\u{985e}");
msg!(col_size, "Size", "\u{30b5}\u{30a4}\u{30ba}");

// ── Errors ───────────────────────────────────────────────────────

msg!(
    err_file_not_found,
    "File not found",
    "\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{304c}\u{898b}\u{3064}\u{304b}\u{308a}\u{307e}\u{305b}\u{3093}"
);
msg!(
    err_parse_failed,
    "An error occurred while parsing the email file.",
    "\u{30e1}\u{30fc}\u{30eb}\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{306e}\u{89e3}\u{6790}\u{4e2d}\u{306b}\u{30a8}\u{30e9}\u{30fc}\u{304c}\u{767a}\u{751f}\u{3057}\u{307e}\u{3057}\u{305f}\u{3002}"
);
msg!(
    err_no_file_given,
    "No .eml file specified. Usage:\n\n  emlview <message.eml>\n\nRun 'emlview --help' for more options.",
    ".eml\u{30d5}\u{30a1}\u{30a4}\u{30eb}\u{304c}\u{6307}\u{5b9a}\u{3055}\u{308c}\u{3066}\u{3044}\u{307e}\u{305b}\u{3093}\u{3002}\u{4f7f}\u{3044}\u{65b9}:\n\n  emlview <message.eml>\n\n\u{8a73}\u{7d30}\u{306f} 'emlview --help' \u{3092}\u{5b9f}\u{884c}\u{3057}\u{3066}\u{304f}\u{3060}\u{3055}\u{3044}\u{3002}"
);
