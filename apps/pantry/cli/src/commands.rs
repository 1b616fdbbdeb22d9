//! Command-line arguments shared by one-shot commands and the shell

use clap::{Args, Parser, Subcommand};
use domain_items::{ItemCategory, ItemUnit};
use domain_items::models::ItemEnum;
use std::str::FromStr;

use crate::client::ItemDraft;

/// Accept only members of an item value set, listing them on error.
fn parse_member<E: ItemEnum + FromStr>(value: &str) -> Result<E, String> {
    E::from_str(value)
        .map_err(|_| format!("expected one of: {}", E::values().join(", ")))
}

fn parse_quantity(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(q) if q.is_finite() && q >= 0.0 => Ok(q),
        _ => Err("quantity must be a non-negative number".to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct AddArgs {
    /// Item name (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,

    #[arg(short, long, value_parser = parse_quantity)]
    pub quantity: Option<f64>,

    #[arg(short, long, value_parser = parse_member::<ItemCategory>)]
    pub category: Option<ItemCategory>,

    #[arg(short, long, value_parser = parse_member::<ItemUnit>)]
    pub unit: Option<ItemUnit>,
}

impl From<AddArgs> for ItemDraft {
    fn from(args: AddArgs) -> Self {
        ItemDraft {
            name: Some(args.name.join(" ")),
            quantity: args.quantity,
            category: args.category,
            unit: args.unit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct EditArgs {
    /// New name (words are joined with spaces)
    #[arg(short, long, num_args = 1..)]
    pub name: Option<Vec<String>>,

    #[arg(short, long, value_parser = parse_quantity)]
    pub quantity: Option<f64>,

    #[arg(short, long, value_parser = parse_member::<ItemCategory>)]
    pub category: Option<ItemCategory>,

    #[arg(short, long, value_parser = parse_member::<ItemUnit>)]
    pub unit: Option<ItemUnit>,
}

impl From<EditArgs> for ItemDraft {
    fn from(args: EditArgs) -> Self {
        ItemDraft {
            name: args.name.map(|words| words.join(" ")),
            quantity: args.quantity,
            category: args.category,
            unit: args.unit,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pantry")]
#[command(about = "Manage pantry and shopping list items")]
pub struct Cli {
    /// API base URL including `/api` (default: $PANTRY_API_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show all items, newest first
    List,

    /// Add an item
    Add(AddArgs),

    /// Change fields of an item
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },

    /// Flip an item's completed mark
    Toggle { id: String },

    /// Remove an item
    Delete { id: String },

    /// Check that the service is up
    Health,

    /// Interactive session; items are addressed by list position
    Shell,
}

/// One line typed in the shell
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true)]
#[command(override_usage = "<command> [args]")]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, PartialEq, Subcommand)]
pub enum ShellCommand {
    /// Reload the list
    #[command(alias = "ls")]
    List,

    Add(AddArgs),

    Edit {
        position: usize,
        #[command(flatten)]
        fields: EditArgs,
    },

    Toggle { position: usize },

    #[command(alias = "rm")]
    Delete { position: usize },

    #[command(alias = "exit")]
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(line: &str) -> Result<ShellCommand, clap::Error> {
        ShellLine::try_parse_from(line.split_whitespace()).map(|l| l.command)
    }

    #[test]
    fn test_add_joins_name_words() {
        let cli = Cli::try_parse_from(["pantry", "add", "Greek", "yogurt", "-u", "packet"]).unwrap();
        let Commands::Add(args) = cli.command else {
            panic!("expected add");
        };

        let draft = ItemDraft::from(args);
        assert_eq!(draft.name.as_deref(), Some("Greek yogurt"));
        assert_eq!(draft.unit, Some(ItemUnit::Packet));
        assert_eq!(draft.quantity, None);
    }

    #[test]
    fn test_rejects_unknown_unit_and_negative_quantity() {
        assert!(Cli::try_parse_from(["pantry", "add", "Milk", "--unit", "bogus"]).is_err());
        assert!(Cli::try_parse_from(["pantry", "add", "Milk", "--quantity", "-1"]).is_err());
        assert!(Cli::try_parse_from(["pantry", "add"]).is_err());
    }

    #[test]
    fn test_unknown_category_lists_values() {
        let err = parse_member::<ItemCategory>("candy").unwrap_err();
        assert!(err.contains("fruit"));
        assert!(err.contains("supplement"));
    }

    #[test]
    fn test_edit_by_id() {
        let cli = Cli::try_parse_from([
            "pantry", "edit", "0199", "--name", "Oat milk", "--category", "beverage",
        ])
        .unwrap();

        match cli.command {
            Commands::Edit { id, fields } => {
                assert_eq!(id, "0199");
                let draft = ItemDraft::from(fields);
                assert_eq!(draft.name.as_deref(), Some("Oat milk"));
                assert_eq!(draft.category, Some(ItemCategory::Beverage));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_shell_edit_renames_to_multiple_words() {
        let ShellCommand::Edit { position, fields } = shell("edit 1 -n Oat milk -q 2").unwrap() else {
            panic!("expected edit");
        };

        assert_eq!(position, 1);
        let draft = ItemDraft::from(fields);
        assert_eq!(draft.name.as_deref(), Some("Oat milk"));
        assert_eq!(draft.quantity, Some(2.0));
    }

    #[test]
    fn test_shell_lines() {
        assert_eq!(shell("ls").unwrap(), ShellCommand::List);
        assert_eq!(shell("toggle 2").unwrap(), ShellCommand::Toggle { position: 2 });
        assert_eq!(shell("rm 1").unwrap(), ShellCommand::Delete { position: 1 });
        assert_eq!(shell("exit").unwrap(), ShellCommand::Quit);
        assert!(shell("toggle two").is_err());
        assert!(shell("frobnicate").is_err());
    }
}
