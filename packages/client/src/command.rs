//! Parsing of input lines into protocol events.

use irori_server::infrastructure::dto::websocket::ClientEvent;

/// What an input line asks the client to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send an event to the server
    Send(ClientEvent),
    /// Print the last roster received, without a round trip
    ShowUsers,
}

/// Map one input line to a command.
///
/// `/nick <n>`, `/whois <n>`, `/msg <to> <text>`, `/me <text>`,
/// `/quit [reason]` and `/users` are recognized; anything else is said to
/// the room as `nick`.
pub fn parse_input(line: &str, nick: &str) -> Command {
    let say = || {
        Command::Send(ClientEvent::ChatMsg {
            nick: nick.to_string(),
            message: line.to_string(),
        })
    };

    let Some(rest) = line.strip_prefix('/') else {
        return say();
    };
    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let event = match name {
        "nick" => ClientEvent::Nick {
            nick: args.to_string(),
        },
        "whois" => ClientEvent::Whois {
            nick: args.to_string(),
        },
        "msg" => {
            let (to, message) = args.split_once(char::is_whitespace).unwrap_or((args, ""));
            ClientEvent::Pvt {
                to: to.to_string(),
                message: message.trim_start().to_string(),
            }
        }
        "me" => ClientEvent::ChatAction {
            nick: nick.to_string(),
            message: args.to_string(),
        },
        "quit" => ClientEvent::Quit {
            message: args.to_string(),
        },
        "users" => return Command::ShowUsers,
        _ => return say(),
    };
    Command::Send(event)
}
