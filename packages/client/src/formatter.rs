//! Event formatting utilities for client display.

use serde_json::Value;
use ynity_server::infrastructure::dto::websocket::{PlayerInfo, ServerEvent};

const RULE: &str = "============================================================";

/// Event formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server event.
    ///
    /// `me` is the local player's name, used to mark their own row.
    pub fn format_server_event(event: &ServerEvent, me: Option<&str>) -> String {
        match event {
            ServerEvent::RoomCreated { room_id } => Self::format_room_created(room_id),
            ServerEvent::RoomUpdate { players } => Self::format_room_update(players, me),
            ServerEvent::StartQuiz {} => Self::format_start_quiz(),
            ServerEvent::Question { data, time } => Self::format_question(data, *time),
            ServerEvent::CoachMessage { text } => Self::format_coach_message(text),
            ServerEvent::QuizEnd(ranking) => Self::format_quiz_end(ranking, me),
        }
    }

    pub fn format_room_created(room_id: &str) -> String {
        format!(
            "\n* Room '{}' created. Share this id so others can /join it.\n",
            room_id
        )
    }

    /// Format the participant list with scores and ready marks
    pub fn format_room_update(players: &[PlayerInfo], me: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\nPlayers:\n", RULE));

        if players.is_empty() {
            output.push_str("(No players)\n");
        } else {
            for player in players {
                let ready = if player.ready { "[ready]" } else { "[     ]" };
                output.push_str(&format!(
                    "{} {}{} - {} pts\n",
                    ready,
                    player.name,
                    me_suffix(&player.name, me),
                    player.score
                ));
            }
        }

        output.push_str(RULE);
        output.push('\n');
        output
    }

    pub fn format_start_quiz() -> String {
        "\n>>> The quiz is starting!\n".to_string()
    }

    /// Format a question payload.
    ///
    /// The payload shape belongs to the content service; a `question` or
    /// `text` string and an `options`/`choices` list are shown when present,
    /// anything else is printed as JSON.
    pub fn format_question(data: &Value, time: u64) -> String {
        let mut output = format!("\n\n? Question ({}s to answer)\n", time);

        let text = data
            .get("question")
            .or_else(|| data.get("text"))
            .and_then(Value::as_str);
        match text {
            Some(text) => output.push_str(&format!("  {}\n", text)),
            None => output.push_str(&format!(
                "  {}\n",
                serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
            )),
        }

        let options = data
            .get("options")
            .or_else(|| data.get("choices"))
            .and_then(Value::as_array);
        if let Some(options) = options {
            for (i, option) in options.iter().enumerate() {
                let label = option
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| option.to_string());
                output.push_str(&format!("  {}) {}\n", i + 1, label));
            }
        }

        output.push_str("  answer with /right or /wrong\n");
        output
    }

    pub fn format_coach_message(text: &str) -> String {
        format!("\n[coach] {}\n", text)
    }

    /// Format the final ranking, highest score first
    pub fn format_quiz_end(ranking: &[PlayerInfo], me: Option<&str>) -> String {
        let mut output = format!("\n\n{}\nFinal ranking:\n", RULE);
        for (i, player) in ranking.iter().enumerate() {
            output.push_str(&format!(
                "{}. {}{} - {} pts\n",
                i + 1,
                player.name,
                me_suffix(&player.name, me),
                player.score
            ));
        }
        output.push_str(RULE);
        output.push('\n');
        output
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

fn me_suffix(name: &str, me: Option<&str>) -> &'static str {
    if me == Some(name) { " (me)" } else { "" }
}
