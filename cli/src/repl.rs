//! Line-oriented command loop over a [`LedgerEngine`].

use std::io::{self, BufRead, Write};

use split_ledger_core::engine::{LedgerEngine, LedgerMode};
use split_ledger_core::split::Payer;
use split_ledger_core::PersonId;

const HELP: &str = "\
commands:
  list                       show friends and balances
  add NAME [AVATAR_URL]      add a friend (avatar defaults to the configured one)
  toggle-add                 open/close the add-friend form
  select N|#ID               select a friend (again to close)
  deselect                   close any open form
  bill [N]                   set (or clear) the bill value
  mine [N]                   set (or clear) your expense
  payer you|friend           who is paying the bill
  split                      submit the current split
  split TOTAL MINE you|friend  split in one go
  remove N|#ID               remove a friend
  clear                      remove everyone (asks first)
  log                        show committed events
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Add { name: String, avatar: Option<String> },
    ToggleAdd,
    Select(String),
    Deselect,
    Bill(Option<i64>),
    Mine(Option<i64>),
    Payer(Payer),
    Split,
    SplitWith { total: i64, mine: i64, payer: Payer },
    Remove(String),
    Clear,
    Log,
    Help,
    Quit,
}

fn parse_amount(token: Option<&str>) -> Result<Option<i64>, String> {
    token
        .map(|t| t.parse::<i64>().map_err(|_| format!("'{}' is not a whole number", t)))
        .transpose()
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut tokens = line.split_whitespace();
    let Some(head) = tokens.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = tokens.collect();

    let command = match (head, rest.as_slice()) {
        ("list" | "ls", []) => Command::List,
        ("add", [_, ..]) => {
            let (avatar, name_tokens) = match rest.split_last() {
                Some((last, init)) if last.contains("://") && !init.is_empty() => {
                    (Some(last.to_string()), init)
                }
                _ => (None, rest.as_slice()),
            };
            Command::Add {
                name: name_tokens.join(" "),
                avatar,
            }
        }
        ("toggle-add", []) => Command::ToggleAdd,
        ("select", [target]) => Command::Select(target.to_string()),
        ("deselect" | "close", []) => Command::Deselect,
        ("bill", []) | ("bill", [_]) => Command::Bill(parse_amount(rest.first().copied())?),
        ("mine", []) | ("mine", [_]) => Command::Mine(parse_amount(rest.first().copied())?),
        ("payer", [who]) => Command::Payer(who.parse()?),
        ("split", []) => Command::Split,
        ("split", [total, mine, who]) => Command::SplitWith {
            total: parse_amount(Some(*total))?.unwrap_or_default(),
            mine: parse_amount(Some(*mine))?.unwrap_or_default(),
            payer: who.parse()?,
        },
        ("remove" | "rm", [target]) => Command::Remove(target.to_string()),
        ("clear", []) => Command::Clear,
        ("log", []) => Command::Log,
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        _ => return Err(format!("unrecognized command '{}', try 'help'", line.trim())),
    };
    Ok(command)
}

/// Resolve `#ID` to a raw id, otherwise a 1-based list position
///
/// Tokens that are not a valid position fall back to a raw id.
fn resolve(engine: &LedgerEngine, target: &str) -> PersonId {
    if let Some(id) = target.strip_prefix('#') {
        return PersonId::from(id);
    }
    target
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=engine.roster().len()).contains(n))
        .and_then(|n| engine.roster().people().get(n - 1))
        .map(|p| p.id().clone())
        .unwrap_or_else(|| PersonId::from(target))
}

fn render<W: Write>(engine: &LedgerEngine, out: &mut W) -> io::Result<()> {
    if engine.roster().is_empty() {
        writeln!(out, "(no friends yet)")?;
    }
    for (i, person) in engine.roster().iter().enumerate() {
        let marker = if engine.selection().is_selected(person.id()) { '*' } else { ' ' };
        writeln!(
            out,
            "{} {}. {} [{}] - {}",
            marker,
            i + 1,
            person.name(),
            person.id(),
            person.describe()
        )?;
    }

    match engine.mode() {
        LedgerMode::Idle => {}
        LedgerMode::Adding => writeln!(
            out,
            "add form open (avatar defaults to {})",
            engine.config().default_avatar
        )?,
        LedgerMode::Selected(_) => {
            if let (Some(person), Some(draft)) = (engine.selected_person(), engine.pending()) {
                let show = |v: Option<i64>| v.map(|v| v.to_string()).unwrap_or_default();
                writeln!(
                    out,
                    "split a bill with {}: bill [{}] your expense [{}] {}'s expense [{}] paid by {}",
                    person.name(),
                    show(draft.total_bill()),
                    show(draft.user_contribution()),
                    person.name(),
                    show(draft.friend_expense()),
                    match draft.payer() {
                        Payer::User => "you".to_string(),
                        Payer::Friend => person.name().to_string(),
                    }
                )?;
            }
        }
    }
    Ok(())
}

/// Run commands from `input` until EOF or `quit`
pub fn run<R: BufRead, W: Write>(engine: &mut LedgerEngine, mut input: R, mut out: W) -> io::Result<()> {
    render(engine, &mut out)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "error: {}", msg)?;
                continue;
            }
        };

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Command::Log => {
                for event in engine.event_log().events() {
                    writeln!(out, "#{} {:?}", event.seq(), event)?;
                }
                continue;
            }
            Command::List => Ok(()),
            Command::Add { name, avatar } => {
                let avatar = avatar.unwrap_or_else(|| engine.config().default_avatar.clone());
                engine.add_person(&name, &avatar).map(|p| {
                    tracing::debug!(id = %p.id(), "added from terminal");
                })
            }
            Command::ToggleAdd => {
                engine.toggle_add_mode();
                Ok(())
            }
            Command::Select(target) => {
                let id = resolve(engine, &target);
                engine.select_person(&id).map(|_| ())
            }
            Command::Deselect => {
                engine.deselect();
                Ok(())
            }
            Command::Bill(value) => engine.set_total_bill(value),
            Command::Mine(value) => engine.set_user_contribution(value),
            Command::Payer(payer) => engine.set_payer(payer),
            Command::Split => engine.submit_pending_split().map(|_| ()),
            Command::SplitWith { total, mine, payer } => {
                engine.submit_split(Some(total), Some(mine), payer).map(|_| ())
            }
            Command::Remove(target) => {
                let id = resolve(engine, &target);
                engine.remove_person(&id).map(|_| ())
            }
            Command::Clear => {
                let (input, out) = (&mut input, &mut out);
                let cleared = engine.clear_all(|| {
                    let mut answer = String::new();
                    write!(out, "Are you sure you want to remove everyone? [y/N] ").is_ok()
                        && out.flush().is_ok()
                        && input.read_line(&mut answer).is_ok()
                        && answer.trim().eq_ignore_ascii_case("y")
                });
                if !cleared {
                    writeln!(out, "nothing cleared")?;
                }
                Ok(())
            }
        };

        if let Err(err) = result {
            writeln!(out, "error: {}", err)?;
        }
        render(engine, &mut out)?;
    }
    Ok(())
}
