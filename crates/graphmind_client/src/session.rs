//! Interactive chat loop. Input lines feed a [`ChatBox`]; each accepted
//! question is sent over a channel to the loop that owns the [`App`], which
//! keeps reading input while backend calls are outstanding.

use std::io::Write;
use std::sync::Arc;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::app::App;
use crate::chat_box::{self, ChatBox};
use crate::client::Backend;
use crate::messages::Transcript;
use crate::render::RenderOptions;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input reader stopped unexpectedly: {0}")]
    Input(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub render: RenderOptions,
    /// Print the input placeholder whenever the app goes idle.
    pub prompt: bool,
}

/// Result of a one-shot question.
#[derive(Debug)]
pub struct OneShot {
    pub transcript: Transcript,
    /// False when the question was blank or the backend call failed.
    pub answered: bool,
}

/// Reads questions from `input` until EOF, then waits for outstanding answers
/// and returns the final transcript.
pub async fn run<B, R, W>(
    backend: Arc<B>,
    input: R,
    out: &mut W,
    opts: SessionOptions,
) -> Result<Transcript, SessionError>
where
    B: Backend + ?Sized + 'static,
    R: AsyncBufRead + Unpin + Send + 'static,
    W: Write,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let reader = tokio::spawn(read_questions(input, tx));

    let mut app = App::new();
    let mut in_flight = FuturesUnordered::new();
    let mut input_open = true;
    let mut drawn = 0;

    if opts.prompt {
        chat_box::prompt(out)?;
    }

    loop {
        tokio::select! {
            question = rx.recv(), if input_open => {
                let Some(question) = question else {
                    debug!("input closed");
                    input_open = false;
                    continue;
                };
                let pending = app.begin(question);
                let backend = Arc::clone(&backend);
                in_flight.push(async move {
                    let outcome = backend.query(pending.question()).await;
                    (pending, outcome)
                });
            }
            Some((pending, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                app.settle(pending, outcome);
            }
            else => break,
        }

        chat_box::view_from(app.transcript(), drawn, app.is_loading(), &opts.render, out)?;
        drawn = app.transcript().len();
        if opts.prompt && input_open && !app.is_loading() {
            chat_box::prompt(out)?;
        }
        out.flush()?;
    }

    reader.await??;
    info!(turns = app.transcript().len(), "session finished");
    Ok(app.into_transcript())
}

async fn read_questions<R>(input: R, tx: mpsc::UnboundedSender<String>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut chat_box = ChatBox::new();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        chat_box.set_draft(line);
        if let Some(question) = chat_box.submit() {
            if tx.send(question).is_err() {
                break;
            }
        }
    }
    Ok(())
}

/// Asks a single question and renders the resulting turns.
pub async fn ask_once<B, W>(
    backend: &B,
    question: &str,
    out: &mut W,
    opts: &RenderOptions,
) -> Result<OneShot, SessionError>
where
    B: Backend + ?Sized,
    W: Write,
{
    let mut chat_box = ChatBox::new();
    chat_box.set_draft(question);
    let mut app = App::new();

    let Some(question) = chat_box.submit() else {
        return Ok(OneShot {
            transcript: app.into_transcript(),
            answered: false,
        });
    };

    let pending = app.begin(question);
    chat_box::view(app.transcript(), app.is_loading(), opts, out)?;
    out.flush()?;

    let outcome = backend.query(pending.question()).await;
    let answered = outcome.is_ok();
    app.settle(pending, outcome);
    chat_box::view_from(app.transcript(), 1, app.is_loading(), opts, out)?;
    out.flush()?;

    Ok(OneShot {
        transcript: app.into_transcript(),
        answered,
    })
}
