//! JSON-lines stand-in for the chat transport.
//!
//! Requests:  `{"id": .., "cmd": "message", "payload": {"user_id": 42, "text": ".."}}`
//!            `{"id": .., "cmd": "button",  "payload": {"user_id": 42, "button": "save"}}`
//!            `{"id": .., "cmd": "ping"}`
//! Replies:   `{"id": .., "status": "ok", "payload": {"user_id": 42, "text": "..", "buttons": [..]}}`

use serde_json::{json, Value};

use crate::error::ProtocolError;
use crate::model::interaction::{Button, Interaction};
use crate::session::dispatch::{Event, Outbound};

mod command;
use command::Command;

#[derive(Debug)]
pub enum Request {
    Ping { id: Value },
    Event(Event),
}

#[derive(Debug)]
pub struct Rejected {
    pub id: Value,
    pub error: ProtocolError,
}

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

pub fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

pub fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

pub fn pong(id: Value) -> String {
    ok(id, json!({ "message": "wanted-check alive" }))
}

pub fn render(out: &Outbound) -> String {
    let buttons: Vec<&str> = out.reply.buttons.iter().map(|b| b.id()).collect();
    ok(
        out.request_id.clone(),
        json!({
            "user_id": out.user_id,
            "text": out.reply.text,
            "buttons": buttons
        }),
    )
}

pub fn parse(input: &str) -> Result<Request, Rejected> {
    let req: Value = serde_json::from_str(input).map_err(|_| Rejected {
        id: Value::Null,
        error: ProtocolError::InvalidJson,
    })?;

    let id = get_id(&req);
    let payload = get_payload(&req);

    let interaction = match Command::from(get_cmd(&req)) {
        Command::Ping => return Ok(Request::Ping { id }),
        Command::Message => payload
            .get("text")
            .and_then(|v| v.as_str())
            .map(Interaction::from_text)
            .ok_or(ProtocolError::MissingField("payload.text")),
        Command::Button => match payload.get("button").and_then(|v| v.as_str()) {
            Some(b) => Button::from_id(b)
                .map(Interaction::Press)
                .ok_or_else(|| ProtocolError::UnknownButton(b.to_string())),
            None => Err(ProtocolError::MissingField("payload.button")),
        },
        Command::Unknown => Err(ProtocolError::UnknownCommand),
    };

    let user_id = payload
        .get("user_id")
        .and_then(|v| v.as_i64())
        .ok_or(ProtocolError::MissingField("payload.user_id"));

    match (user_id, interaction) {
        (Ok(user_id), Ok(interaction)) => Ok(Request::Event(Event {
            user_id,
            request_id: id,
            interaction,
        })),
        (Err(error), _) | (_, Err(error)) => Err(Rejected { id, error }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::interaction::Reply;

    fn event(line: &str) -> Event {
        match parse(line) {
            Ok(Request::Event(e)) => e,
            other => panic!("expected event, got {other:?}"),
        }
    }

    fn rejected(line: &str) -> Rejected {
        match parse(line) {
            Err(r) => r,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn ping_needs_no_payload() {
        assert!(matches!(
            parse(r#"{"id":1,"cmd":"ping"}"#),
            Ok(Request::Ping { .. })
        ));
    }

    #[test]
    fn message_becomes_text_interaction() {
        let e = event(r#"{"id":"a","cmd":"message","payload":{"user_id":42,"text":"Павло"}}"#);
        assert_eq!(e.user_id, 42);
        assert_eq!(e.request_id, json!("a"));
        assert_eq!(e.interaction, Interaction::Text("Павло".into()));
    }

    #[test]
    fn slash_cancel_becomes_button() {
        let e = event(r#"{"cmd":"message","payload":{"user_id":1,"text":"/cancel"}}"#);
        assert_eq!(e.interaction, Interaction::Press(Button::Cancel));
        assert_eq!(e.request_id, Value::Null);
    }

    #[test]
    fn button_ids_are_checked() {
        let e = event(r#"{"id":2,"cmd":"button","payload":{"user_id":1,"button":"dont_save"}}"#);
        assert_eq!(e.interaction, Interaction::Press(Button::DontSave));

        let r = rejected(r#"{"id":3,"cmd":"button","payload":{"user_id":1,"button":"save_yes"}}"#);
        assert_eq!(r.id, json!(3));
        assert_eq!(r.error, ProtocolError::UnknownButton("save_yes".into()));
    }

    #[test]
    fn malformed_requests_are_rejected() {
        assert_eq!(rejected("not json").error, ProtocolError::InvalidJson);
        assert_eq!(
            rejected(r#"{"id":1,"cmd":"translate"}"#).error,
            ProtocolError::UnknownCommand
        );
        assert_eq!(
            rejected(r#"{"id":1,"cmd":"message","payload":{"text":"x"}}"#).error,
            ProtocolError::MissingField("payload.user_id")
        );
        assert_eq!(
            rejected(r#"{"id":1,"cmd":"message","payload":{"user_id":1}}"#).error,
            ProtocolError::MissingField("payload.text")
        );
    }

    #[test]
    fn outbound_renders_button_ids() {
        let out = Outbound {
            user_id: 42,
            request_id: json!(9),
            reply: Reply::text("hi").with_buttons(&[Button::Save, Button::DontSave]),
        };
        let v: Value = serde_json::from_str(&render(&out)).unwrap();
        assert_eq!(v["id"], json!(9));
        assert_eq!(v["status"], "ok");
        assert_eq!(v["payload"]["user_id"], 42);
        assert_eq!(v["payload"]["buttons"], json!(["save", "dont_save"]));
    }

    #[test]
    fn errors_carry_the_request_id() {
        let v: Value = serde_json::from_str(&err(json!(5), "unknown command")).unwrap();
        assert_eq!(v["id"], json!(5));
        assert_eq!(v["status"], "error");
        assert_eq!(v["message"], "unknown command");
    }
}
