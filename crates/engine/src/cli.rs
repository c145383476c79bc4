//! Command-line surface over [`CharacterService`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use charsmith_domain::{
    Ability, Character, CharacterId, CreationInput, Edition, ImprovementRequest,
};
use clap::{ArgGroup, Parser, Subcommand};
use serde::Serialize;

use crate::use_cases::{CharacterService, CommandResult, Notice};

/// Tabletop character builder
#[derive(Parser)]
#[command(name = "charsmith")]
#[command(about = "Derive, level, equip, and rest tabletop characters", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create a character from a creation-input JSON file
    Create { input: PathBuf },

    /// List all characters
    List,

    /// Show one character
    Show { id: CharacterId },

    /// Gain a level
    LevelUp { id: CharacterId },

    /// Lose a level
    LevelDown { id: CharacterId },

    /// Learn a cantrip opened at `level`
    ChooseCantrip {
        id: CharacterId,
        level: u8,
        slug: String,
    },

    /// Pick a subclass
    ChooseSubclass { id: CharacterId, slug: String },

    /// Resolve an ability score improvement with ability increases or a feat
    #[command(group(ArgGroup::new("choice").required(true).args(["ability", "feat"])))]
    Improve {
        id: CharacterId,
        /// Level the improvement was gained at (defaults to the current level)
        #[arg(long)]
        level: Option<u8>,
        /// Ability increase such as `STR=2` or `dex=1`; repeatable
        #[arg(long = "ability", value_parser = parse_increase)]
        ability: Vec<(Ability, i32)>,
        #[arg(long)]
        feat: Option<String>,
    },

    /// Spend hit dice to recover hit points
    ShortRest { id: CharacterId, dice: u32 },

    /// Restore hit points, hit dice, and spell slots
    LongRest { id: CharacterId },

    /// Equip an inventory item
    Equip { id: CharacterId, slug: String },

    /// Unequip an item
    Unequip { id: CharacterId, slug: String },

    /// Add items to the inventory
    AddItem {
        id: CharacterId,
        slug: String,
        #[arg(default_value_t = 1)]
        quantity: u32,
    },

    /// Remove items from the inventory
    RemoveItem {
        id: CharacterId,
        slug: String,
        quantity: u32,
    },

    /// Expend a spell slot
    Cast { id: CharacterId, slot_level: u8 },

    /// Write every character to a JSON file
    Export { file: PathBuf },

    /// Load characters from an exported JSON file, with fresh ids
    Import { file: PathBuf },

    /// Delete a character
    Delete { id: CharacterId },
}

/// What a command prints: JSON on stdout, messages on stderr.
#[derive(Debug, Default)]
pub struct Output {
    pub json: Option<String>,
    pub messages: Vec<String>,
}

impl Output {
    fn from_result(result: CommandResult) -> Result<Self> {
        let mut output = Self {
            json: Some(serde_json::to_string_pretty(&result.character)?),
            messages: result.message.into_iter().collect(),
        };
        output.push_notice(result.notice);
        Ok(output)
    }

    fn push_notice(&mut self, notice: Option<Notice>) {
        if let Some(notice) = notice {
            self.messages.push(notice.message());
        }
    }
}

/// One row of `list` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CharacterSummary<'a> {
    id: CharacterId,
    name: &'a str,
    race: &'a str,
    class: &'a str,
    level: u8,
}

impl<'a> From<&'a Character> for CharacterSummary<'a> {
    fn from(character: &'a Character) -> Self {
        Self {
            id: character.id(),
            name: character.name(),
            race: character.race(),
            class: character.class_name(),
            level: character.level(),
        }
    }
}

fn parse_increase(s: &str) -> Result<(Ability, i32), String> {
    let (ability, amount) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ABILITY=AMOUNT, got '{s}'"))?;
    let ability: Ability = ability.parse().map_err(|e| format!("{e}"))?;
    let amount: i32 = amount
        .trim()
        .trim_start_matches('+')
        .parse()
        .map_err(|e| format!("invalid amount '{amount}': {e}"))?;
    Ok((ability, amount))
}

/// Parse creation input, filling in `default_edition` when the document has no edition.
pub fn parse_creation_input(json: &str, default_edition: Edition) -> Result<CreationInput> {
    let mut value: serde_json::Value =
        serde_json::from_str(json).context("creation input is not valid JSON")?;
    let Some(object) = value.as_object_mut() else {
        bail!("creation input must be a JSON object");
    };
    object
        .entry("edition")
        .or_insert_with(|| serde_json::Value::String(default_edition.to_string()));
    serde_json::from_value(value).context("invalid creation input")
}

/// Execute one command against the service.
pub async fn run(
    command: Command,
    service: &CharacterService,
    default_edition: Edition,
) -> Result<Output> {
    let result = match command {
        Command::Create { input } => {
            let json = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            service
                .create(parse_creation_input(&json, default_edition)?)
                .await?
        }
        Command::List => {
            let characters = service.list();
            let summaries: Vec<CharacterSummary<'_>> =
                characters.iter().map(CharacterSummary::from).collect();
            return Ok(Output {
                json: Some(serde_json::to_string_pretty(&summaries)?),
                messages: Vec::new(),
            });
        }
        Command::Show { id } => {
            let character = service.get(id)?;
            let messages = service
                .pending_choices(id)
                .iter()
                .map(|choice| choice.message())
                .collect();
            return Ok(Output {
                json: Some(serde_json::to_string_pretty(&character)?),
                messages,
            });
        }
        Command::LevelUp { id } => service.level_up(id).await?,
        Command::LevelDown { id } => service.level_down(id).await?,
        Command::ChooseCantrip { id, level, slug } => {
            service.choose_cantrip(id, level, &slug).await?
        }
        Command::ChooseSubclass { id, slug } => service.choose_subclass(id, &slug).await?,
        Command::Improve {
            id,
            level,
            ability,
            feat,
        } => {
            let level = match level {
                Some(level) => level,
                None => service.get(id)?.level(),
            };
            let request = match feat {
                Some(slug) => ImprovementRequest::Feat(slug),
                None => {
                    let mut increases = BTreeMap::new();
                    for (ability, amount) in ability {
                        *increases.entry(ability).or_insert(0) += amount;
                    }
                    ImprovementRequest::Abilities(increases)
                }
            };
            service.improve(id, level, request).await?
        }
        Command::ShortRest { id, dice } => service.short_rest(id, dice).await?,
        Command::LongRest { id } => service.long_rest(id).await?,
        Command::Equip { id, slug } => service.equip(id, &slug).await?,
        Command::Unequip { id, slug } => service.unequip(id, &slug).await?,
        Command::AddItem { id, slug, quantity } => service.add_item(id, &slug, quantity).await?,
        Command::RemoveItem { id, slug, quantity } => {
            service.remove_item(id, &slug, quantity).await?
        }
        Command::Cast { id, slot_level } => service.use_spell_slot(id, slot_level).await?,
        Command::Export { file } => {
            let json = service.export()?;
            std::fs::write(&file, json)
                .with_context(|| format!("failed to write {}", file.display()))?;
            return Ok(Output {
                json: None,
                messages: vec![format!(
                    "Exported {} character(s) to {}",
                    service.list().len(),
                    file.display()
                )],
            });
        }
        Command::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let imported = service.import(&json).await?;
            let mut output = Output {
                json: Some(serde_json::to_string_pretty(&imported.characters)?),
                messages: vec![format!("Imported {} character(s)", imported.characters.len())],
            };
            for notice in imported.notices {
                output.push_notice(Some(notice));
            }
            return Ok(output);
        }
        Command::Delete { id } => {
            let mut output = Output {
                json: None,
                messages: vec![format!("Deleted {id}")],
            };
            output.push_notice(service.delete(id).await?);
            return Ok(output);
        }
    };
    Output::from_result(result)
}
