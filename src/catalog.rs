// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Command catalog: the fixed, ordered set of trainable commands
//!
//! The catalog is loaded once at startup and treated as read-only
//! everywhere else. A built-in catalog ships with the crate; a TOML file
//! can replace it for custom training plans.

use crate::models::{Command, CommandCategory};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Errors raised while validating a catalog definition
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog contains no commands")]
    Empty,

    #[error("duplicate command id: {0}")]
    DuplicateCommand(String),

    #[error("command {id} has difficulty {difficulty}, expected 1..=3")]
    InvalidDifficulty { id: String, difficulty: u8 },

    #[error("command {0} has a zero estimated duration")]
    InvalidDuration(String),
}

/// On-disk catalog file layout
#[derive(Debug, serde::Deserialize)]
struct CatalogFile {
    commands: Vec<Command>,
}

/// The ordered command catalog
///
/// Iteration order is the definition order, which several coaching rules
/// rely on for deterministic tie-breaking.
#[derive(Debug, Clone)]
pub struct CommandCatalog {
    commands: Vec<Command>,
}

impl CommandCatalog {
    /// Load the catalog from a file or fall back to the built-in set
    pub fn load(path: Option<String>) -> Result<Self> {
        // Try explicit path first
        if let Some(catalog_path) = path {
            return Self::load_from_file(&catalog_path);
        }

        // Try default catalog file
        if Path::new("commands.toml").exists() {
            return Self::load_from_file("commands.toml");
        }

        // Fall back to the built-in catalog
        Ok(Self::default())
    }

    /// Load a catalog from a specific TOML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path))?;

        let file: CatalogFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path))?;

        let catalog = Self::from_commands(file.commands)
            .with_context(|| format!("Invalid catalog file: {}", path))?;

        Ok(catalog)
    }

    /// Build a catalog from an explicit command list, validating it
    pub fn from_commands(commands: Vec<Command>) -> std::result::Result<Self, CatalogError> {
        if commands.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for command in &commands {
            if !seen.insert(command.id.clone()) {
                return Err(CatalogError::DuplicateCommand(command.id.clone()));
            }
            if !(1..=3).contains(&command.difficulty) {
                return Err(CatalogError::InvalidDifficulty {
                    id: command.id.clone(),
                    difficulty: command.difficulty,
                });
            }
            if command.estimated_minutes == 0 {
                return Err(CatalogError::InvalidDuration(command.id.clone()));
            }
        }

        Ok(Self { commands })
    }

    /// Look up a command by id
    pub fn find(&self, id: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.id == id)
    }

    /// All commands in definition order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Commands in one category, in definition order
    pub fn by_category(&self, category: CommandCategory) -> Vec<&Command> {
        self.commands
            .iter()
            .filter(|c| c.category == category)
            .collect()
    }

    /// Number of commands in the catalog
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the catalog is empty (never true for a validated catalog)
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self {
            commands: built_in_commands(),
        }
    }
}

fn cmd(
    id: &str,
    name: &str,
    description: &str,
    category: CommandCategory,
    difficulty: u8,
    estimated_minutes: u32,
    steps: &[&str],
    tips: &[&str],
    common_mistakes: &[&str],
) -> Command {
    Command {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category,
        difficulty,
        estimated_minutes,
        steps: steps.iter().map(|s| s.to_string()).collect(),
        tips: tips.iter().map(|s| s.to_string()).collect(),
        common_mistakes: common_mistakes.iter().map(|s| s.to_string()).collect(),
    }
}

/// The built-in training catalog: five commands per category
fn built_in_commands() -> Vec<Command> {
    use CommandCategory::{Advanced, Basic, Manners};

    vec![
        // Basic obedience
        cmd(
            "sit",
            "Sit",
            "Dog lowers into a seated position on cue",
            Basic,
            1,
            5,
            &[
                "Hold a treat just above the dog's nose",
                "Move it slowly back over the head",
                "Mark and reward the moment the rear touches the ground",
            ],
            &["Reward fast at first, then add duration"],
            &["Pushing the dog's rear down", "Repeating the cue"],
        ),
        cmd(
            "down",
            "Down",
            "Dog lies flat with elbows on the ground",
            Basic,
            1,
            5,
            &[
                "Start from a sit",
                "Lure the nose down between the front paws",
                "Mark when the elbows touch the ground",
            ],
            &["Train on a soft surface at first"],
            &["Luring too fast so the dog stands up"],
        ),
        cmd(
            "come",
            "Come",
            "Dog returns to the handler immediately when called",
            Basic,
            1,
            10,
            &[
                "Start a few steps away in a quiet room",
                "Call once in a happy voice and crouch",
                "Reward generously on arrival",
            ],
            &["Never call the dog to something unpleasant"],
            &["Chasing the dog when it ignores the cue"],
        ),
        cmd(
            "stay",
            "Stay",
            "Dog holds its position until released",
            Basic,
            2,
            10,
            &[
                "Cue a sit or down",
                "Take a single step back, then return and reward",
                "Add distance and duration separately",
            ],
            &["Always use a clear release word"],
            &["Increasing distance and duration at the same time"],
        ),
        cmd(
            "heel",
            "Heel",
            "Dog walks at the handler's side on a loose leash",
            Basic,
            2,
            15,
            &[
                "Reward the dog for standing at your left side",
                "Take one step and reward in position",
                "Build up to longer stretches with turns",
            ],
            &["Keep your reward hand at your side, not in front"],
            &["Letting the dog surge ahead before rewarding"],
        ),
        // Manners
        cmd(
            "leave_it",
            "Leave It",
            "Dog ignores an item on cue",
            Manners,
            2,
            10,
            &[
                "Close a treat in your fist and let the dog sniff",
                "Mark and reward from the other hand when it backs off",
                "Progress to treats on the floor under your shoe",
            ],
            &["Never reward with the item being left"],
            &["Moving the item away instead of waiting the dog out"],
        ),
        cmd(
            "drop_it",
            "Drop It",
            "Dog releases whatever is in its mouth",
            Manners,
            2,
            10,
            &[
                "Offer a trade for a toy the dog is holding",
                "Mark the instant the jaw opens",
                "Return the toy often so trades stay worthwhile",
            ],
            &["Play this as a game before you need it for real"],
            &["Prying the mouth open", "Only cueing it to confiscate"],
        ),
        cmd(
            "wait",
            "Wait",
            "Dog pauses at a threshold until released",
            Manners,
            2,
            5,
            &[
                "Approach a door with the dog on leash",
                "Open it a crack and close it if the dog moves forward",
                "Release through once the dog holds back",
            ],
            &["Doorways, car doors, and food bowls all count"],
            &["Confusing wait with a formal stay"],
        ),
        cmd(
            "off",
            "Off",
            "Dog keeps four paws on the floor around people and furniture",
            Manners,
            2,
            10,
            &[
                "Turn away silently when the dog jumps up",
                "Reward heavily while all four paws are down",
                "Ask visitors to do the same",
            ],
            &["Reward the floor, not the jump"],
            &["Kneeing or pushing the dog, which reads as play"],
        ),
        cmd(
            "settle",
            "Settle",
            "Dog relaxes on a mat until released",
            Manners,
            2,
            15,
            &[
                "Reward any interaction with the mat",
                "Shape lying down with relaxed hips",
                "Slowly add household distractions",
            ],
            &["Feed calmly on the mat rather than tossing treats"],
            &["Expecting a long settle before the mat has value"],
        ),
        // Advanced tricks
        cmd(
            "shake",
            "Shake",
            "Dog lifts a paw into the handler's hand",
            Advanced,
            3,
            5,
            &[
                "Hold a treat in a closed fist at chest height",
                "Mark any paw movement toward the fist",
                "Shape into a held paw-to-palm touch",
            ],
            &["Capture the paw lift rather than grabbing the paw"],
            &["Rewarding scratching at the fist"],
        ),
        cmd(
            "spin",
            "Spin",
            "Dog turns a full circle on cue",
            Advanced,
            3,
            5,
            &[
                "Lure the nose in a wide horizontal circle",
                "Mark on completion of the turn",
                "Fade the lure into a small hand signal",
            ],
            &["Train both directions to keep the dog balanced"],
            &["Shrinking the lure circle too quickly"],
        ),
        cmd(
            "roll_over",
            "Roll Over",
            "Dog rolls from one side across its back to the other",
            Advanced,
            3,
            10,
            &[
                "Start from a down with relaxed hips",
                "Lure the nose toward the shoulder blade",
                "Follow through so the dog completes the roll",
            ],
            &["Break the roll into quarter turns if the dog sticks"],
            &["Luring over the top in a single fast arc"],
        ),
        cmd(
            "play_dead",
            "Play Dead",
            "Dog flops onto its side and stays still",
            Advanced,
            3,
            10,
            &[
                "Capture the flop from a relaxed down",
                "Add a distinct cue, different from roll over",
                "Build duration with calm, slow rewards",
            ],
            &["A dramatic verbal cue makes this a crowd favorite"],
            &["Letting it blur together with roll over"],
        ),
        cmd(
            "fetch",
            "Fetch",
            "Dog retrieves a thrown item and returns it to hand",
            Advanced,
            3,
            15,
            &[
                "Build toy drive with short hallway throws",
                "Trade the toy for a treat on return",
                "Chain pickup, carry, and delivery to hand",
            ],
            &["End the game while the dog still wants more"],
            &["Chasing the dog to get the toy back"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_catalog_is_valid() {
        let catalog = CommandCatalog::default();

        assert_eq!(catalog.len(), 15);
        // Re-validating the built-in set must succeed
        assert!(CommandCatalog::from_commands(catalog.commands().to_vec()).is_ok());
    }

    #[test]
    fn test_default_catalog_covers_all_categories() {
        let catalog = CommandCatalog::default();

        for category in CommandCategory::ALL {
            assert_eq!(catalog.by_category(category).len(), 5, "{:?}", category);
        }
    }

    #[test]
    fn test_default_catalog_has_difficulty_one_starters() {
        // The cold-start rule needs at least one difficulty-1 command
        let catalog = CommandCatalog::default();
        assert!(catalog.commands().iter().any(|c| c.difficulty == 1));
    }

    #[test]
    fn test_find_by_id() {
        let catalog = CommandCatalog::default();

        let sit = catalog.find("sit").expect("sit should exist");
        assert_eq!(sit.name, "Sit");
        assert_eq!(sit.category, CommandCategory::Basic);

        assert!(catalog.find("juggle").is_none());
    }

    #[test]
    fn test_from_commands_rejects_duplicates() {
        let mut commands = built_in_commands();
        commands.push(commands[0].clone());

        let result = CommandCatalog::from_commands(commands);
        assert!(matches!(result, Err(CatalogError::DuplicateCommand(id)) if id == "sit"));
    }

    #[test]
    fn test_from_commands_rejects_bad_difficulty() {
        let mut commands = built_in_commands();
        commands[0].difficulty = 4;

        let result = CommandCatalog::from_commands(commands);
        assert!(matches!(
            result,
            Err(CatalogError::InvalidDifficulty { difficulty: 4, .. })
        ));
    }

    #[test]
    fn test_from_commands_rejects_empty() {
        let result = CommandCatalog::from_commands(vec![]);
        assert!(matches!(result, Err(CatalogError::Empty)));
    }

    #[test]
    fn test_catalog_file_loading() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            r#"
[[commands]]
id = "sit"
name = "Sit"
description = "Seated position on cue"
category = "basic"
difficulty = 1
estimated_minutes = 5
steps = ["Lure up and back", "Mark the sit"]
tips = ["Short sessions"]
common_mistakes = ["Repeating the cue"]

[[commands]]
id = "spin"
name = "Spin"
description = "Full circle on cue"
category = "advanced"
difficulty = 3
estimated_minutes = 5
"#
        )?;

        let catalog = CommandCatalog::load_from_file(temp_file.path().to_str().unwrap())?;

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("sit").unwrap().steps.len(), 2);

        // Lists omitted from the file default to empty
        let spin = catalog.find("spin").unwrap();
        assert_eq!(spin.category, CommandCategory::Advanced);
        assert!(spin.steps.is_empty());

        Ok(())
    }

    #[test]
    fn test_catalog_file_loading_rejects_invalid() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(
            temp_file,
            r#"
[[commands]]
id = "sit"
name = "Sit"
description = "Seated position on cue"
category = "basic"
difficulty = 9
estimated_minutes = 5
"#
        )?;

        let result = CommandCatalog::load_from_file(temp_file.path().to_str().unwrap());
        assert!(result.is_err());

        Ok(())
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = CommandCatalog::load(Some("/nonexistent/commands.toml".to_string()));
        assert!(result.is_err());
    }
}
