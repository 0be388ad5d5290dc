use crate::character::StatAllocation;
use crate::core::errors::GameError;
use crate::items::EquipmentSlot;
use std::str::FromStr;

/// Transport-independent commands, one per chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(String),
    Stats,
    Inventory,
    Skills,
    Explore,
    Attack,
    /// 1-based skill number.
    Skill(usize),
    Flee,
    Allocate(StatAllocation),
    Equip { slot: EquipmentSlot, item: String },
    /// Consumable name, e.g. `Health Potion`.
    Use(String),
    Save,
    Load,
    Remaining,
    Reset,
    AutoBattle,
    Rest,
    Delete,
    Confirm(String),
    Help,
}

fn usage(text: &str) -> GameError {
    GameError::Validation(format!("Usage: {}", text))
}

impl FromStr for Command {
    type Err = GameError;

    /// Parses a chat line such as `!skill 2` or `equip weapon Goblin Sword`.
    /// The leading `!` is optional and command names are case-insensitive.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let line = input.trim();
        let line = line.strip_prefix('!').unwrap_or(line);
        let (name, args) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "create" | "create-character" | "start" => {
                if args.is_empty() {
                    return Err(usage("!create <name>"));
                }
                Ok(Command::Create(args.to_string()))
            }
            "stats" | "status" => Ok(Command::Stats),
            "inventory" | "inv" => Ok(Command::Inventory),
            "skills" => Ok(Command::Skills),
            "explore" | "start-encounter" | "battle" => Ok(Command::Explore),
            "attack" => Ok(Command::Attack),
            "skill" => args
                .parse::<usize>()
                .map(Command::Skill)
                .map_err(|_| usage("!skill <number>")),
            "flee" | "run" => Ok(Command::Flee),
            "allocate" => {
                if args.is_empty() {
                    return Err(usage("!allocate vit=1 str=2"));
                }
                // also accept the short form `allocate vit 2`
                let words: Vec<&str> = args.split_whitespace().collect();
                let allocation = match words.as_slice() {
                    [stat, points] if !args.contains('=') => {
                        StatAllocation::parse(&format!("{}={}", stat, points))?
                    }
                    _ => StatAllocation::parse(args)?,
                };
                Ok(Command::Allocate(allocation))
            }
            "equip" => {
                let (slot, item) = args
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| usage("!equip <weapon|armor|accessory> <item name>"))?;
                Ok(Command::Equip {
                    slot: slot.parse()?,
                    item: item.trim().to_string(),
                })
            }
            "use" | "use-item" | "use_potion" | "drink" => {
                if args.is_empty() {
                    return Err(usage("!use <item name>"));
                }
                Ok(Command::Use(args.to_string()))
            }
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "remaining" | "battles" => Ok(Command::Remaining),
            "reset" | "time-until-reset" => Ok(Command::Reset),
            "auto-battle" | "autobattle" | "auto" => Ok(Command::AutoBattle),
            "rest" => Ok(Command::Rest),
            "delete" | "delete-character" => Ok(Command::Delete),
            "confirm" => Ok(Command::Confirm(args.to_string())),
            "help" | "commands" => Ok(Command::Help),
            "" => Err(GameError::Validation(
                "Type `!help` to see the available commands.".to_string(),
            )),
            other => Err(GameError::Validation(format!(
                "Unknown command `{}`. Type `!help` to see the available commands.",
                other
            ))),
        }
    }
}
