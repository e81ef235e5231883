//! Relay session: connect, join, then pump terminal input and relay events.

use std::time::{Duration, Instant};

use famchat_server::infrastructure::dto::websocket::ClientFrame;
use futures_util::{Sink, SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    args::ClientArgs,
    error::ClientError,
    message::{ChatRecord, RelayEvent, format_chat_line},
    typing::TypingIndicator,
};

/// One line of terminal input, interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(String),
    Typing,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Self::Empty,
            "/quit" => Self::Quit,
            "/typing" => Self::Typing,
            _ => Self::Send(line.to_string()),
        }
    }
}

pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let (socket, _) = connect_async(args.url.as_str())
        .await
        .map_err(|source| ClientError::Connect {
            url: args.url.clone(),
            source,
        })?;
    let (mut sink, mut stream) = socket.split();

    let connection_id = loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => {
                if let Ok(RelayEvent::Connected { connection_id }) = RelayEvent::parse(text.as_str())
                {
                    break connection_id;
                }
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => return Err(e.into()),
            None => return Err(ClientError::NoGreeting),
        }
    };
    tracing::info!("Connected to {} as '{}'", args.url, connection_id);

    send_frame(&mut sink, &ClientFrame::join(&args.room)).await?;
    println!(
        "Joined '{}' as {}. Type a message, /typing, or /quit.",
        args.room, args.user
    );

    let mut lines = spawn_line_reader(format!("{}> ", args.user));
    let mut typing = TypingIndicator::new();
    let mut tick = tokio::time::interval(Duration::from_millis(500));

    loop {
        tokio::select! {
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => show_event(text.as_str(), &args.user, &mut typing),
                Some(Ok(Message::Close(_))) | None => {
                    println!("Relay closed the connection");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
            },
            line = lines.recv() => match line.as_deref().map(Command::parse) {
                Some(Command::Send(content)) => {
                    let record = ChatRecord::new(args.user.as_str(), content);
                    let frame = ClientFrame::relay_broadcast(args.room.as_str(), record.to_raw()?);
                    send_frame(&mut sink, &frame).await?;
                }
                Some(Command::Typing) => {
                    let frame = ClientFrame::relay_typing(args.room.as_str(), args.user.as_str());
                    send_frame(&mut sink, &frame).await?;
                }
                Some(Command::Empty) => {}
                Some(Command::Quit) | None => break,
            },
            _ = tick.tick() => {
                for line in expired_typing_lines(&mut typing, Instant::now()) {
                    println!("{line}");
                }
            }
        }
    }

    let _ = sink.send(Message::Close(None)).await;
    Ok(())
}

async fn send_frame<S>(sink: &mut S, frame: &ClientFrame) -> Result<(), ClientError>
where
    S: Sink<Message, Error = tokio_tungstenite::tungstenite::Error> + Unpin,
{
    let text = serde_json::to_string(frame)?;
    sink.send(Message::Text(text.into())).await?;
    Ok(())
}

fn show_event(frame: &str, me: &str, typing: &mut TypingIndicator) {
    match RelayEvent::parse(frame) {
        Ok(RelayEvent::Chat(record)) => {
            typing.clear(&record.sender);
            println!("{}", format_chat_line(&record));
        }
        Ok(RelayEvent::Other { payload }) => println!("[message] {payload}"),
        Ok(RelayEvent::Typing { user }) => {
            if user != me && typing.mark(&user, Instant::now()) {
                println!("{user} is typing...");
            }
        }
        Ok(RelayEvent::Connected { .. }) => {}
        Err(e) => tracing::warn!("Unrecognized frame from relay: {}", e),
    }
}

/// Lines announcing users whose typing indication ran out at `now`.
fn expired_typing_lines(typing: &mut TypingIndicator, now: Instant) -> Vec<String> {
    typing
        .expire(now)
        .into_iter()
        .map(|user| format!("{user} stopped typing"))
        .collect()
}

/// Read terminal lines on a blocking thread. The channel closes on EOF/Ctrl-C.
fn spawn_line_reader(prompt: String) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("Failed to open terminal: {}", e);
                return;
            }
        };

        loop {
            match editor.readline(&prompt) {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Terminal input failed: {}", e);
                    break;
                }
            }
        }
    });

    rx
}
