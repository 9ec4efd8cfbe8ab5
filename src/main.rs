//! Mensajero command line client
//!
//! Drives the local chat store from the terminal. State lives in the data
//! directory (or `--data-dir`) as one JSON file per storage key.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};

use mensajero::chat::view::{
    chat_list, group_by_day, header_subtitle, highlight, search_messages, sender_color,
};
use mensajero::chat::{is_valid_conversation_name, Category, ChatFilter, ChatStore};
use mensajero::i18n::dates::format_time;
use mensajero::i18n::{Language, TextKey, Translator};
use mensajero::session::{Preferences, Session, Theme};
use mensajero::storage::settings::{
    get_settings_path, load_settings, load_settings_from, save_settings, AppSettings,
};
use mensajero::storage::{FileStore, StorageError};
use mensajero::types::{DeleteMode, Message, ProfileUpdate, UserProfile};

#[derive(Parser)]
#[command(name = "mensajero", version, about = "Local WhatsApp-style chat client")]
struct Cli {
    /// Directory holding settings and stored state
    #[arg(long, value_name = "PATH", global = true)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List conversations
    List {
        /// Only chats whose name contains this text
        #[arg(long, default_value = "")]
        filter: String,
        /// all, unread, groups or favorites
        #[arg(long, default_value = "all")]
        category: Category,
    },
    /// Open a conversation, marking it as read
    Show {
        id: String,
        /// Only messages containing this text
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Start a new conversation
    New {
        #[arg(value_parser = parse_name)]
        name: String,
    },
    /// Send a message
    Send {
        id: String,
        #[arg(default_value = "")]
        text: String,
        /// Attach an image given as a data URI
        #[arg(long)]
        image: Option<String>,
    },
    /// Mark a conversation as read
    Read { id: String },
    /// Delete a message
    Delete {
        id: String,
        message_id: String,
        /// me or everyone
        #[arg(long, default_value = "me")]
        mode: DeleteMode,
    },
    /// Log in with a local profile
    Login {
        name: String,
        email: String,
        #[arg(long, default_value = "")]
        avatar: String,
    },
    /// Forget the local profile
    Logout,
    /// Show the current profile
    Whoami,
    /// Edit the current profile
    Profile {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Set the interface language (es or en)
    Lang { language: Language },
    /// Set the theme, or toggle it when omitted
    Theme { theme: Option<Theme> },
    /// Show settings, updating the given values first
    Settings {
        /// Sender label for your own messages
        #[arg(long)]
        user_label: Option<String>,
        /// Avatar generator for new conversations
        #[arg(long)]
        avatar_base_url: Option<String>,
    },
}

fn parse_name(value: &str) -> Result<String, String> {
    if is_valid_conversation_name(value) {
        Ok(value.to_string())
    } else {
        Err("name must not be blank".to_string())
    }
}

/// Log filter when `RUST_LOG` is unset; stdout is left to command output
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Settings and slots for this invocation
struct Paths {
    settings: AppSettings,
    settings_path: PathBuf,
    slots: FileStore,
}

fn resolve_paths(data_dir: Option<PathBuf>) -> Result<Paths, StorageError> {
    let (settings, settings_path) = match &data_dir {
        Some(dir) => {
            let path = dir.join("settings.json");
            (load_settings_from(&path), path)
        }
        None => (load_settings(), get_settings_path()?),
    };
    let slots = match (&settings.slots_dir, data_dir) {
        (Some(dir), _) => FileStore::new(dir.clone()),
        (None, Some(dir)) => FileStore::new(dir),
        (None, None) => FileStore::in_data_dir()?,
    };
    Ok(Paths {
        settings,
        settings_path,
        slots,
    })
}

fn run(cli: Cli) -> Result<(), StorageError> {
    let Paths {
        settings,
        settings_path,
        slots,
    } = resolve_paths(cli.data_dir)?;
    let mut prefs = Preferences::open_with_env(slots.clone())?;

    match cli.command {
        Command::List { filter, category } => {
            let store = ChatStore::open(slots, &settings)?;
            print_list(&store, &ChatFilter { query: filter, category }, &prefs.translator());
        }
        Command::Show { id, search } => {
            let mut store = ChatStore::open(slots, &settings)?;
            store.mark_read(&id)?;
            print_conversation(&store, &id, &search, &prefs.translator());
        }
        Command::New { name } => {
            let mut store = ChatStore::open(slots, &settings)?;
            let id = store.create_conversation(&name)?;
            println!("{id}");
        }
        Command::Send { id, text, image } => {
            if text.trim().is_empty() && image.is_none() {
                println!("Nothing to send");
                return Ok(());
            }
            let mut store = ChatStore::open(slots, &settings)?;
            store.send_message(&id, &text, image)?;
        }
        Command::Read { id } => {
            let mut store = ChatStore::open(slots, &settings)?;
            store.mark_read(&id)?;
        }
        Command::Delete { id, message_id, mode } => {
            let mut store = ChatStore::open(slots, &settings)?;
            let allowed = store
                .conversation(&id)
                .and_then(|c| c.find_message(&message_id))
                .map_or(true, |m| mode == DeleteMode::Me || m.can_delete_for_everyone());
            let tr = prefs.translator();
            if !allowed {
                println!("{}", tr.t(TextKey::OnlyOwnMessages));
                return Ok(());
            }
            store.delete_message(&id, &message_id, mode)?;
            let done = match mode {
                DeleteMode::Me => TextKey::DeleteMe,
                DeleteMode::Everyone => TextKey::DeleteEveryone,
            };
            println!("{}: {message_id}", tr.t(done));
        }
        Command::Login { name, email, avatar } => {
            let mut session = Session::open(slots)?;
            session.login(UserProfile { name, avatar, email })?;
        }
        Command::Logout => {
            let mut session = Session::open(slots)?;
            session.logout()?;
            println!("{}", prefs.translator().t(TextKey::LoggedOut));
        }
        Command::Whoami => {
            let session = Session::open(slots)?;
            match session.user() {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("{}", prefs.translator().t(TextKey::LoggedOut)),
            }
        }
        Command::Profile { name, avatar, email } => {
            let mut session = Session::open(slots)?;
            session.update_profile(ProfileUpdate { name, avatar, email })?;
        }
        Command::Lang { language } => prefs.set_language(language)?,
        Command::Theme { theme } => {
            let next = theme.unwrap_or_else(|| prefs.theme().toggled());
            prefs.set_theme(next)?;
            println!("{}", next.code());
        }
        Command::Settings {
            user_label,
            avatar_base_url,
        } => {
            let updated = update_settings(&settings, user_label, avatar_base_url);
            if updated != settings {
                save_settings(&settings_path, &updated)?;
            }
            println!("local_user_label: {}", updated.local_user_label);
            println!("avatar_base_url: {}", updated.avatar_base_url);
            println!("chats_key: {}", updated.chats_key);
            println!("slots: {}", slots.root().display());
            println!("settings: {}", settings_path.display());
        }
    }

    Ok(())
}

fn update_settings(
    current: &AppSettings,
    user_label: Option<String>,
    avatar_base_url: Option<String>,
) -> AppSettings {
    let mut updated = current.clone();
    if let Some(label) = user_label {
        updated.local_user_label = label;
    }
    if let Some(url) = avatar_base_url {
        updated.avatar_base_url = url;
    }
    updated.validate();
    updated
}

fn print_list(store: &ChatStore<FileStore>, filter: &ChatFilter, tr: &Translator) {
    let now = Local::now();
    let entries = chat_list(store.conversations(), filter, &now, tr);
    if entries.is_empty() {
        println!("{}", tr.t(TextKey::NoChats));
        return;
    }

    println!("[{}]", tr.t(filter.category.label_key()));
    for entry in entries {
        let c = entry.conversation;
        let unread = if c.unread > 0 {
            format!(" ({})", c.unread)
        } else {
            String::new()
        };
        let star = if c.is_favorite { "★ " } else { "" };
        println!("{star}{}{unread}  {}  [{}]", c.name, entry.when, c.id);
        println!("    {}", c.last_message);
    }
}

fn print_conversation(store: &ChatStore<FileStore>, id: &str, search: &str, tr: &Translator) {
    let Some(conversation) = store.conversation(id) else {
        println!("{}", tr.t(TextKey::NoChats));
        return;
    };
    let now = Local::now();

    println!("{}", conversation.name);
    println!("{}", header_subtitle(conversation, &now, tr));

    let shown = search_messages(&conversation.messages, search);
    if shown.is_empty() {
        println!("{}", tr.t(TextKey::NoMessages));
        return;
    }

    for group in group_by_day(&shown, &now, tr) {
        println!("\n— {} —", group.label);
        for message in group.messages {
            let who = if message.is_me {
                tr.t(TextKey::You).to_string()
            } else if conversation.is_group {
                format!("{} {}", message.sender, sender_color(&message.sender))
            } else {
                message.sender.clone()
            };
            println!(
                "  {} {}: {}  [{}]",
                format_time(&message.timestamp, &now),
                who,
                render_body(message, search, tr),
                message.id
            );
        }
    }
}

fn render_body(message: &Message, search: &str, tr: &Translator) -> String {
    if message.is_deleted {
        return format!("🚫 {}", tr.t(TextKey::DeletedMessage));
    }
    let mut body: String = highlight(&message.text, search)
        .into_iter()
        .map(|segment| {
            if segment.matched {
                format!("**{}**", segment.text)
            } else {
                segment.text.to_string()
            }
        })
        .collect();
    if message.image.is_some() {
        let photo = format!("📷 {}", tr.t(TextKey::Photo));
        body = if body.is_empty() { photo } else { format!("{photo} {body}") };
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_log_filter_hides_info() {
        let level: tracing::level_filters::LevelFilter = DEFAULT_LOG_FILTER.parse().unwrap();
        assert_eq!(level, tracing::level_filters::LevelFilter::WARN);
        assert!(tracing::Level::INFO > level);
    }

    #[test]
    fn test_data_dir_holds_settings_and_slots() {
        let dir = TempDir::new().unwrap();
        let paths = resolve_paths(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(paths.settings, AppSettings::default());
        assert_eq!(paths.settings_path, dir.path().join("settings.json"));
        assert_eq!(paths.slots.root(), dir.path());
    }

    #[test]
    fn test_saved_settings_are_used_next_run() {
        let dir = TempDir::new().unwrap();
        let slots_dir = dir.path().join("slots");
        let paths = resolve_paths(Some(dir.path().to_path_buf())).unwrap();

        let mut updated = update_settings(&paths.settings, Some("Yo".into()), None);
        updated.slots_dir = Some(slots_dir.clone());
        save_settings(&paths.settings_path, &updated).unwrap();

        let reopened = resolve_paths(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(reopened.settings.local_user_label, "Yo");
        assert_eq!(reopened.slots.root(), slots_dir.as_path());
    }

    #[test]
    fn test_update_settings_rejects_bad_values() {
        let current = AppSettings::default();
        let updated = update_settings(&current, Some("  ".into()), Some("not a url".into()));
        assert_eq!(updated, current);
    }
}
