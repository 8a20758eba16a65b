//! Update dispatch and handlers.

use dossier_core::{Config, Engine};
use dossier_llm::LlmProvider;
use teloxide::dispatching::UpdateHandler;
use teloxide::dispatching::dialogue::{self, InMemStorage};
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::Document;
use teloxide::utils::command::BotCommands;

use crate::keyboard;
use crate::session::SessionState;

const MAX_MESSAGE_LEN: usize = 4096;

type SessionDialogue = Dialogue<SessionState, InMemStorage<SessionState>>;
type HandlerResult = anyhow::Result<()>;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
enum Command {
    #[command(description = "show the main menu")]
    Start,
}

/// Transport-level knobs taken from the `[ingest]` config section.
#[derive(Debug, Clone)]
pub struct BotSettings {
    pub chunk_size: usize,
    pub max_file_bytes: u64,
}

impl BotSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            chunk_size: config.ingest.chunk_size,
            max_file_bytes: config.ingest.max_file_bytes,
        }
    }

    fn max_file_megabytes(&self) -> u64 {
        self.max_file_bytes / (1024 * 1024)
    }
}

/// Run the dispatcher until shutdown.
///
/// Updates from distinct chats are processed concurrently; within one chat
/// they stay sequential, so each interaction runs to completion before the
/// next one starts.
pub async fn run<P>(token: String, engine: Engine<P>, settings: BotSettings)
where
    P: LlmProvider + 'static,
{
    let bot = Bot::new(token);
    tracing::info!("telegram dispatcher started");
    Dispatcher::builder(bot, schema::<P>())
        .dependencies(dptree::deps![
            InMemStorage::<SessionState>::new(),
            engine,
            settings
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn schema<P>() -> UpdateHandler<anyhow::Error>
where
    P: LlmProvider + 'static,
{
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start].endpoint(start::<P>));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(case![SessionState::AwaitingFile].endpoint(receive_file::<P>))
        .branch(case![SessionState::AwaitingQuery].endpoint(receive_query::<P>))
        .branch(dptree::endpoint(nudge_to_menu));

    let callback_handler = Update::filter_callback_query().endpoint(handle_callback::<P>);

    dialogue::enter::<Update, InMemStorage<SessionState>, SessionState, _>()
        .branch(message_handler)
        .branch(callback_handler)
}

async fn start<P>(
    bot: Bot,
    dialogue: SessionDialogue,
    engine: Engine<P>,
    msg: Message,
) -> HandlerResult
where
    P: LlmProvider + 'static,
{
    dialogue.update(SessionState::Idle).await?;
    bot.send_message(
        msg.chat.id,
        "Welcome to your document search bot! Please pick an action:",
    )
    .reply_markup(keyboard::main_menu())
    .await?;

    if let Some(user) = &msg.from {
        let identity = user.id.to_string();
        tracing::info!(identity, "new session, ensuring collection");
        if let Err(e) = engine.ensure_collection(&identity).await {
            tracing::warn!(identity, "failed to ensure collection: {e}");
        }
    }
    Ok(())
}

async fn handle_callback<P>(
    bot: Bot,
    dialogue: SessionDialogue,
    engine: Engine<P>,
    settings: BotSettings,
    q: CallbackQuery,
) -> HandlerResult
where
    P: LlmProvider + 'static,
{
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };
    let identity = q.from.id.to_string();

    match q.data.as_deref() {
        Some("search") => {
            dialogue.update(SessionState::AwaitingQuery).await?;
            bot.send_message(chat_id, "Type your query!")
                .reply_markup(keyboard::back_to_menu())
                .await?;
        }
        Some("upload") => {
            dialogue.update(SessionState::AwaitingFile).await?;
            bot.send_message(
                chat_id,
                format!(
                    "Attach a file! Maximum size {} MB, plain-text .txt only.",
                    settings.max_file_megabytes()
                ),
            )
            .reply_markup(keyboard::back_to_menu())
            .await?;
        }
        Some("delete") => match engine.delete_collection(&identity).await {
            Ok(()) => {
                bot.send_message(chat_id, "Your files have been deleted!")
                    .reply_markup(keyboard::back_to_menu())
                    .await?;
            }
            Err(e) => {
                tracing::error!(identity, "failed to delete collection: {e}");
                bot.send_message(chat_id, "Unexpected error, please try again later.")
                    .reply_markup(keyboard::back_to_menu())
                    .await?;
            }
        },
        Some("menu") => {
            dialogue.update(SessionState::Idle).await?;
            if let Err(e) = engine.ensure_collection(&identity).await {
                tracing::warn!(identity, "failed to ensure collection: {e}");
            }
            bot.send_message(chat_id, "Please pick an action:")
                .reply_markup(keyboard::main_menu())
                .await?;
        }
        _ => {}
    }
    Ok(())
}

async fn receive_file<P>(
    bot: Bot,
    engine: Engine<P>,
    settings: BotSettings,
    msg: Message,
) -> HandlerResult
where
    P: LlmProvider + 'static,
{
    let Some(user) = &msg.from else {
        return Ok(());
    };
    let identity = user.id.to_string();

    let document = match vet_document(msg.document(), &settings) {
        Ok(document) => document,
        Err(reason) => {
            bot.send_message(msg.chat.id, reason)
                .reply_markup(keyboard::back_to_menu())
                .await?;
            return Ok(());
        }
    };

    let file = bot.get_file(document.file.id.clone()).await?;
    let mut buffer: Vec<u8> = Vec::new();
    bot.download_file(&file.path, &mut buffer).await?;

    match engine.ingest(&identity, &buffer, settings.chunk_size).await {
        Ok(stored) => {
            tracing::info!(identity, stored, "file ingested");
            bot.send_message(
                msg.chat.id,
                format!("✅ File uploaded and processed ({stored} chunks)."),
            )
            .reply_markup(keyboard::back_to_menu())
            .await?;
        }
        Err(e) => {
            tracing::error!(identity, "ingestion failed: {e}");
            bot.send_message(msg.chat.id, format!("❌ Failed to process the file: {e}"))
                .reply_markup(keyboard::back_to_menu())
                .await?;
        }
    }
    Ok(())
}

async fn receive_query<P>(bot: Bot, engine: Engine<P>, msg: Message) -> HandlerResult
where
    P: LlmProvider + 'static,
{
    let Some(user) = &msg.from else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please send your query as a text message.")
            .reply_markup(keyboard::back_to_menu())
            .await?;
        return Ok(());
    };
    let identity = user.id.to_string();

    match engine.answer(&identity, text).await {
        Ok(reply) => {
            if let Some((last, head)) = split_message(&reply, MAX_MESSAGE_LEN).split_last() {
                for piece in head {
                    bot.send_message(msg.chat.id, *piece).await?;
                }
                bot.send_message(msg.chat.id, *last)
                    .reply_markup(keyboard::back_to_menu())
                    .await?;
            }
        }
        Err(e) => {
            tracing::error!(identity, "failed to answer: {e}");
            bot.send_message(msg.chat.id, "Unexpected error, please try again later.")
                .await?;
        }
    }
    Ok(())
}

async fn nudge_to_menu(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Please use the menu to pick an action:")
        .reply_markup(keyboard::main_menu())
        .await?;
    Ok(())
}

/// Upload gate: only a plain-text document within the configured size cap
/// is accepted. The error carries the reject message shown to the user.
fn vet_document<'a>(
    document: Option<&'a Document>,
    settings: &BotSettings,
) -> Result<&'a Document, String> {
    let Some(document) = document else {
        return Err("Please send a plain-text .txt document.".to_owned());
    };

    let is_plain_text = document
        .mime_type
        .as_ref()
        .is_some_and(|mime| mime.essence_str() == "text/plain");
    if !is_plain_text {
        return Err("Unsupported file format. Only .txt is accepted.".to_owned());
    }

    if u64::from(document.file.size) > settings.max_file_bytes {
        return Err(format!(
            "The file is larger than {} MB.",
            settings.max_file_megabytes()
        ));
    }

    Ok(document)
}

/// Telegram rejects messages longer than 4096 characters, so oversized
/// replies go out as consecutive pieces. Splits fall on char boundaries and
/// prefer a newline within the trailing 256 bytes of each piece.
fn split_message(text: &str, max_bytes: usize) -> Vec<&str> {
    if text.len() <= max_bytes {
        return vec![text];
    }

    let mut pieces = Vec::new();
    let mut offset = 0;

    while offset < text.len() {
        if text.len() - offset <= max_bytes {
            pieces.push(&text[offset..]);
            break;
        }

        let mut split_at = offset + max_bytes;
        while split_at > offset && !text.is_char_boundary(split_at) {
            split_at -= 1;
        }

        let search_start = split_at.saturating_sub(256).max(offset);
        if let Some(newline_pos) = text[search_start..split_at].rfind('\n') {
            let at_newline = search_start + newline_pos + 1;
            if at_newline > offset {
                split_at = at_newline;
            }
        }

        pieces.push(&text[offset..split_at]);
        offset = split_at;
    }

    pieces
}
