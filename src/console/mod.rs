//! Line-oriented console host.
//!
//! Reads one message per line, resolves and parses it synchronously under a
//! read lock, then runs the command body as a tokio task. Replies from all
//! tasks are funneled through one channel to the output sink.

pub mod builtins;

use crate::commands::{Command, CommandDef, Dispatcher, Invocation, TypedCommand};
use crate::config::Config;
use crate::error::{DispatchError, SetupError};
use crate::telemetry::{CommandTimer, spans};
use async_trait::async_trait;
use botcmd_syntax::{Arguments, ErrorKind, SyntaxParser, TypeOptions};
use futures_util::{SinkExt, StreamExt};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec, LinesCodecError};
use tracing::{Instrument, Span, debug, info, warn};

/// Replies buffered between command tasks and the output sink.
const REPLY_QUEUE: usize = 100;

/// Dispatcher shared between the reader loop and running commands.
pub type SharedDispatcher = Arc<RwLock<Dispatcher<BotCommand>>>;

/// Who is typing. Opaque to the parser.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: String,
}

/// One input line. Opaque to the parser.
#[derive(Debug, Clone)]
pub struct Message {
    pub line: u64,
    pub text: String,
}

/// Everything a command body can see.
#[derive(Clone)]
pub struct Context {
    pub session: Arc<Session>,
    pub message: Message,
    /// The tokens that named the command, joined by spaces.
    pub invoked: String,
    pub dispatcher: SharedDispatcher,
}

/// A command body. Returns reply lines.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &Context, args: &Arguments) -> Vec<String>;
}

/// A command definition paired with its body.
#[derive(Clone)]
pub struct BotCommand {
    def: CommandDef,
    handler: Arc<dyn Handler>,
}

impl BotCommand {
    /// Compile `syntax` with `options` and attach `handler`.
    pub fn new(
        name: &str,
        syntax: &str,
        options: TypeOptions,
        handler: impl Handler + 'static,
    ) -> Result<Self, SetupError> {
        let parser = SyntaxParser::new(syntax)
            .and_then(|p| p.with_options(options))
            .map_err(|source| SetupError::Syntax {
                command: name.to_owned(),
                source,
            })?;
        Ok(Self {
            def: CommandDef::with_parser(name, parser),
            handler: Arc::new(handler),
        })
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.def = self.def.alias(alias);
        self
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.def = self.def.describe(description);
        self
    }

    pub fn description(&self) -> &str {
        self.def.description()
    }
}

impl fmt::Debug for BotCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotCommand").field("def", &self.def).finish_non_exhaustive()
    }
}

impl Command for BotCommand {
    fn name(&self) -> &str {
        self.def.name()
    }

    fn aliases(&self) -> Vec<&str> {
        self.def.aliases()
    }
}

impl TypedCommand for BotCommand {
    fn syntax(&self) -> &SyntaxParser {
        self.def.syntax()
    }
}

/// What to do with one input line.
enum Outcome {
    Ignored,
    Reply(String),
    Run {
        handler: Arc<dyn Handler>,
        ctx: Context,
        arguments: Arguments,
        span: Span,
    },
}

/// Build the shared dispatcher from the builtin command set.
pub fn shared_dispatcher(config: &Config) -> Result<SharedDispatcher, SetupError> {
    let tree = builtins::tree(config.syntax.type_options())?;
    Ok(Arc::new(RwLock::new(Dispatcher::from_config(
        tree,
        &config.dispatch,
    ))))
}

/// Console host bound to one session.
pub struct Console {
    dispatcher: SharedDispatcher,
    session: Arc<Session>,
}

impl Console {
    pub fn new(dispatcher: SharedDispatcher, user: impl Into<String>) -> Self {
        Self {
            dispatcher,
            session: Arc::new(Session { user: user.into() }),
        }
    }

    /// Resolve and parse one line. Holds the read lock only for this call.
    fn prepare(&self, message: Message) -> Outcome {
        let dispatcher = self.dispatcher.read();
        let invocation = match dispatcher.dispatch(&*self.session, &message, &message.text) {
            Ok(Some(invocation)) => invocation,
            Ok(None) => return Outcome::Ignored,
            Err(e) => return Self::reject(&e),
        };
        let Invocation {
            command,
            depth,
            arguments,
        } = invocation;

        let invoked = message
            .text
            .trim_start()
            .strip_prefix(dispatcher.prefix())
            .unwrap_or_default()
            .split_whitespace()
            .take(depth)
            .collect::<Vec<_>>()
            .join(" ");

        Outcome::Run {
            handler: Arc::clone(&command.handler),
            span: spans::command(command.name(), depth),
            ctx: Context {
                session: Arc::clone(&self.session),
                message,
                invoked,
                dispatcher: Arc::clone(&self.dispatcher),
            },
            arguments,
        }
    }

    fn reject(error: &DispatchError) -> Outcome {
        match error {
            DispatchError::Syntax { source, .. } if source.kind() == ErrorKind::Internal => {
                warn!(code = error.error_code(), error = %error, "Command grammar failed");
                Outcome::Reply("internal error".to_owned())
            }
            _ => {
                debug!(code = error.error_code(), error = %error, "Dispatch rejected");
                match error.usage_hint() {
                    Some(hint) => Outcome::Reply(hint),
                    None => Outcome::Ignored,
                }
            }
        }
    }

    /// Serve lines from `reader` until EOF, writing replies to `writer`.
    ///
    /// Stops reading as soon as the output side fails and returns the
    /// writer's error.
    pub async fn run<R, W>(&self, reader: R, writer: W) -> Result<(), LinesCodecError>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new());
        let (tx, mut rx) = mpsc::channel::<String>(REPLY_QUEUE);

        let mut writer_task = tokio::spawn(async move {
            let mut sink = FramedWrite::new(writer, LinesCodec::new());
            while let Some(reply) = rx.recv().await {
                sink.send(reply).await?;
            }
            Ok::<_, LinesCodecError>(())
        });

        let prefix = self.dispatcher.read().prefix().to_owned();
        let mut tasks = JoinSet::new();
        let mut line_no: u64 = 0;
        let mut writer_result = None;

        loop {
            // The writer only finishes early when the sink fails.
            let line = tokio::select! {
                biased;
                result = &mut writer_task => {
                    warn!(lines = line_no, "Console output closed");
                    writer_result = Some(result);
                    break;
                }
                line = lines.next() => line,
            };
            let text = match line {
                Some(Ok(text)) => text,
                Some(Err(e)) => {
                    warn!(error = %e, "Console read error");
                    break;
                }
                None => break,
            };
            line_no += 1;

            let span = spans::dispatch(line_no, &prefix);
            let outcome = span.in_scope(|| {
                self.prepare(Message {
                    line: line_no,
                    text,
                })
            });

            match outcome {
                Outcome::Ignored => {}
                Outcome::Reply(reply) => {
                    if tx.send(reply).await.is_err() {
                        warn!(lines = line_no, "Console output closed");
                        break;
                    }
                }
                Outcome::Run {
                    handler,
                    ctx,
                    arguments,
                    span,
                } => {
                    let tx = tx.clone();
                    tasks.spawn(
                        async move {
                            let _timer = CommandTimer::new(&ctx.invoked);
                            for reply in handler.handle(&ctx, &arguments).await {
                                if tx.send(reply).await.is_err() {
                                    debug!("Reply dropped, output closed");
                                    break;
                                }
                            }
                        }
                        .instrument(span),
                    );
                }
            }
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                warn!(error = %e, "Command task failed");
            }
        }
        drop(tx);

        info!(lines = line_no, "Console input closed");
        let result = match writer_result {
            Some(result) => result,
            None => writer_task.await,
        };
        match result {
            Ok(result) => result,
            Err(e) => Err(std::io::Error::other(e).into()),
        }
    }
}
