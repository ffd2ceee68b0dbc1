#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Message,
    Button,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "message" => Command::Message,
            "button" => Command::Button,
            _ => Command::Unknown,
        }
    }
}
