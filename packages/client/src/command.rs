//! Slash commands typed at the prompt.

use ynity_server::infrastructure::dto::websocket::ClientEvent;

use crate::error::ClientError;

pub const HELP: &str = "\
Commands:
  /create <name>          create a room and join it as <name>
  /join <room> <name>     join an existing room as <name>
  /ready [course]         mark yourself ready, optionally choosing a course
  /right | /wrong         report your answer to the current question
  /leave                  leave the current room
  /help                   show this help
";

/// A parsed prompt line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { player_name: String },
    Join { room_id: String, player_name: String },
    Ready { course_id: Option<String> },
    Answer { correct: bool },
    Leave,
    Help,
}

impl Command {
    /// Parse one line of input.
    ///
    /// Player names may contain spaces; everything after the command (and
    /// the room id for `/join`) is taken as the name.
    pub fn parse(line: &str) -> Result<Self, ClientError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "/create" => Ok(Command::Create {
                player_name: required(rest, "/create <name>")?,
            }),
            "/join" => {
                let (room_id, player_name) = rest.split_once(char::is_whitespace).ok_or_else(|| {
                    ClientError::InvalidCommand("/join <room> <name>".to_string())
                })?;
                Ok(Command::Join {
                    room_id: room_id.to_string(),
                    player_name: required(player_name.trim(), "/join <room> <name>")?,
                })
            }
            "/ready" => Ok(Command::Ready {
                course_id: (!rest.is_empty()).then(|| rest.to_string()),
            }),
            "/right" => Ok(Command::Answer { correct: true }),
            "/wrong" => Ok(Command::Answer { correct: false }),
            "/leave" => Ok(Command::Leave),
            "/help" => Ok(Command::Help),
            _ => Err(ClientError::InvalidCommand(format!("'{}' (type /help)", head))),
        }
    }

    /// Build the event to send, if any.
    ///
    /// `/ready` targets the room the client is currently in.
    pub fn to_event(
        &self,
        current_room: Option<&str>,
    ) -> Result<Option<ClientEvent>, ClientError> {
        let event = match self {
            Command::Create { player_name } => ClientEvent::CreateRoom {
                player_name: player_name.clone(),
            },
            Command::Join {
                room_id,
                player_name,
            } => ClientEvent::JoinRoom {
                room_id: room_id.clone(),
                player_name: player_name.clone(),
            },
            Command::Ready { course_id } => ClientEvent::PlayerReady {
                room_id: current_room.ok_or(ClientError::NotInRoom)?.to_string(),
                course_id: course_id.clone(),
            },
            Command::Answer { correct } => ClientEvent::Answer { correct: *correct },
            Command::Leave => ClientEvent::LeaveRoom,
            Command::Help => return Ok(None),
        };
        Ok(Some(event))
    }
}

fn required(value: &str, usage: &str) -> Result<String, ClientError> {
    if value.is_empty() {
        return Err(ClientError::InvalidCommand(usage.to_string()));
    }
    Ok(value.to_string())
}
