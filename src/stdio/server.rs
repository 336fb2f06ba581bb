use super::protocol::{JoinArguments, Message, MessageContent, SplitArguments, SplitFileArguments};
use crate::error::{PycellsError, Result};
use crate::parser;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

const CONTENT_LENGTH: &str = "Content-Length:";

/// Serves split/join requests over `Content-Length` framed JSON.
pub struct Server<R, W> {
    reader: R,
    writer: W,
    seq: u64,
}

impl<R: BufRead, W: Write> Server<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            seq: 0,
        }
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Handle requests until `disconnect` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let msg = match self.read_message() {
                Ok(Some(msg)) => msg,
                Ok(None) => {
                    info!("input closed");
                    return Ok(());
                }
                // The whole frame was consumed, so the stream is still in sync.
                Err(PycellsError::Json(e)) => {
                    warn!(error = %e, "dropping malformed message");
                    continue;
                }
                Err(e) => return Err(e),
            };

            if !self.dispatch(msg)? {
                info!("disconnect requested");
                return Ok(());
            }
        }
    }

    /// Read one framed message. `Ok(None)` means the peer closed the stream
    /// between messages.
    pub fn read_message(&mut self) -> Result<Option<Message>> {
        let mut content_length = None;
        let mut saw_header = false;

        loop {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                if saw_header {
                    return Err(PycellsError::Protocol(
                        "stream ended inside message headers".to_string(),
                    ));
                }
                return Ok(None);
            }

            let line = line.trim_end_matches(['\r', '\n']);
            if line.is_empty() {
                if saw_header {
                    break;
                }
                // tolerate stray blank lines between frames
                continue;
            }
            saw_header = true;

            if let Some(value) = line.strip_prefix(CONTENT_LENGTH) {
                let len = value.trim().parse::<usize>().map_err(|_| {
                    PycellsError::Protocol(format!("bad Content-Length value: {}", value.trim()))
                })?;
                content_length = Some(len);
            }
        }

        let len = content_length
            .filter(|len| *len > 0)
            .ok_or_else(|| PycellsError::Protocol("missing Content-Length header".to_string()))?;

        let mut buffer = vec![0u8; len];
        self.reader.read_exact(&mut buffer)?;
        let msg = serde_json::from_slice(&buffer)?;
        debug!(?msg, "received");
        Ok(Some(msg))
    }

    fn send_message(&mut self, msg: &Message) -> Result<()> {
        let json = serde_json::to_string(msg)?;
        write!(self.writer, "{} {}\r\n\r\n{}", CONTENT_LENGTH, json.len(), json)?;
        self.writer.flush()?;
        debug!(bytes = json.len(), "sent");
        Ok(())
    }

    pub fn send_response(
        &mut self,
        request_seq: u64,
        command: String,
        outcome: Result<Option<Value>>,
    ) -> Result<()> {
        let (success, message, body) = match outcome {
            Ok(body) => (true, None, body),
            Err(e) => {
                warn!(%command, error = %e, "request failed");
                (false, Some(e.to_string()), None)
            }
        };

        let msg = Message {
            seq: self.next_seq(),
            msg_type: "response".to_string(),
            content: MessageContent::Response {
                request_seq,
                success,
                command,
                message,
                body,
            },
        };
        self.send_message(&msg)
    }

    pub fn send_event(&mut self, event: &str, body: Option<Value>) -> Result<()> {
        let msg = Message {
            seq: self.next_seq(),
            msg_type: "event".to_string(),
            content: MessageContent::Event {
                event: event.to_string(),
                body,
            },
        };
        self.send_message(&msg)
    }

    /// Returns `false` once the peer asked to disconnect.
    fn dispatch(&mut self, msg: Message) -> Result<bool> {
        if msg.msg_type != "request" {
            debug!(seq = msg.seq, msg_type = %msg.msg_type, "ignoring non-request message");
            return Ok(true);
        }
        let MessageContent::Request { command, arguments } = msg.content else {
            debug!(seq = msg.seq, "ignoring non-request message");
            return Ok(true);
        };

        match command.as_str() {
            "initialize" => {
                let body = json!({
                    "supportsSplit": true,
                    "supportsSplitFile": true,
                    "supportsJoin": true,
                    "cellSeparator": parser::CELL_SEPARATOR,
                });
                self.send_response(msg.seq, command, Ok(Some(body)))?;
                self.send_event("initialized", None)?;
            }
            "split" => {
                let outcome = handle_split(&command, arguments);
                self.send_response(msg.seq, command, outcome.map(Some))?;
            }
            "splitFile" => {
                let outcome = handle_split_file(&command, arguments);
                self.send_response(msg.seq, command, outcome.map(Some))?;
            }
            "join" => {
                let outcome = handle_join(&command, arguments);
                self.send_response(msg.seq, command, outcome.map(Some))?;
            }
            "disconnect" => {
                self.send_response(msg.seq, command, Ok(None))?;
                return Ok(false);
            }
            _ => {
                let err = PycellsError::Protocol(format!("unknown command: {command}"));
                self.send_response(msg.seq, command, Err(err))?;
            }
        }

        Ok(true)
    }
}

fn parse_arguments<T: DeserializeOwned>(command: &str, arguments: Option<Value>) -> Result<T> {
    let value = arguments.ok_or_else(|| PycellsError::InvalidArguments {
        command: command.to_string(),
        reason: "missing arguments".to_string(),
    })?;
    serde_json::from_value(value).map_err(|e| PycellsError::InvalidArguments {
        command: command.to_string(),
        reason: e.to_string(),
    })
}

fn handle_split(command: &str, arguments: Option<Value>) -> Result<Value> {
    let args: SplitArguments = parse_arguments(command, arguments)?;
    let cells = parser::segment_spans(&args.source);
    info!(cells = cells.len(), "split source");
    Ok(json!({ "cells": cells }))
}

fn handle_split_file(command: &str, arguments: Option<Value>) -> Result<Value> {
    let args: SplitFileArguments = parse_arguments(command, arguments)?;
    let source = std::fs::read_to_string(&args.path).map_err(|source| PycellsError::FileRead {
        path: args.path.clone(),
        source,
    })?;
    let cells = parser::segment_spans(&source);
    info!(path = %args.path.display(), cells = cells.len(), "split file");
    Ok(json!({ "path": args.path, "cells": cells }))
}

fn handle_join(command: &str, arguments: Option<Value>) -> Result<Value> {
    let args: JoinArguments = parse_arguments(command, arguments)?;
    Ok(json!({ "source": parser::join_cells(&args.cells) }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(value: &Value) -> String {
        let body = value.to_string();
        format!("Content-Length: {}\r\n\r\n{}", body.len(), body)
    }

    #[test]
    fn test_read_message_eof_between_frames() {
        let mut out = Vec::new();
        let mut server = Server::new(&b""[..], &mut out);
        assert!(server.read_message().unwrap().is_none());
    }

    #[test]
    fn test_read_message_request() {
        let input = frame(&json!({
            "seq": 3,
            "type": "request",
            "command": "split",
            "arguments": { "source": "x = 1" }
        }));
        let mut out = Vec::new();
        let mut server = Server::new(input.as_bytes(), &mut out);

        let msg = server.read_message().unwrap().unwrap();
        assert_eq!(msg.seq, 3);
        match msg.content {
            MessageContent::Request { command, arguments } => {
                assert_eq!(command, "split");
                assert!(arguments.is_some());
            }
            other => panic!("expected request, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_content_length() {
        let input = "X-Other: 1\r\n\r\n{}";
        let mut out = Vec::new();
        let mut server = Server::new(input.as_bytes(), &mut out);
        assert!(matches!(
            server.read_message(),
            Err(PycellsError::Protocol(_))
        ));
    }

    #[test]
    fn test_truncated_headers() {
        let input = "Content-Length: 10\r\n";
        let mut out = Vec::new();
        let mut server = Server::new(input.as_bytes(), &mut out);
        assert!(matches!(
            server.read_message(),
            Err(PycellsError::Protocol(_))
        ));
    }

    #[test]
    fn test_split_requires_source() {
        let err = handle_split("split", Some(json!({ "text": "x" }))).unwrap_err();
        assert!(err.to_string().contains("split"));

        let err = handle_split("split", None).unwrap_err();
        assert!(err.to_string().contains("missing arguments"));
    }
}
