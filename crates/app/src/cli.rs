//! Command line arguments

use std::path::PathBuf;

use argh::FromArgs;
use relaunch_core::LaunchMode;

/// Remember recently launched run and debug configurations
#[derive(FromArgs, Debug)]
#[argh(help_triggers("-h", "--help"))]
pub struct Args {
    /// settings file, defaults to relaunch.toml in the config directory
    #[argh(option, long = "settings")]
    pub settings: Option<PathBuf>,
    #[argh(subcommand)]
    pub command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
pub enum Command {
    Add(AddArgs),
    Rename(RenameArgs),
    Remove(RemoveArgs),
    Record(RecordArgs),
    List(ListArgs),
    Last(LastArgs),
    Configs(ConfigsArgs),
}

/// register a launch configuration
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "add")]
pub struct AddArgs {
    /// memento identifying the configuration
    #[argh(positional)]
    pub memento: String,
    /// display name
    #[argh(positional)]
    pub name: String,
    /// supported mode, repeatable; both modes when omitted
    #[argh(option, long = "mode")]
    pub modes: Vec<LaunchMode>,
    /// keep launches of this configuration out of the history
    #[argh(switch)]
    pub private: bool,
    /// delete the configuration once it leaves every history list
    #[argh(switch)]
    pub transient: bool,
}

impl AddArgs {
    pub fn modes(&self) -> Vec<LaunchMode> {
        if self.modes.is_empty() {
            vec![LaunchMode::Run, LaunchMode::Debug]
        } else {
            self.modes.clone()
        }
    }
}

/// change the display name of a launch configuration
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "rename")]
pub struct RenameArgs {
    /// memento identifying the configuration
    #[argh(positional)]
    pub memento: String,
    /// new display name
    #[argh(positional)]
    pub name: String,
}

/// delete a launch configuration and forget its launches
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "remove")]
pub struct RemoveArgs {
    /// memento identifying the configuration
    #[argh(positional)]
    pub memento: String,
}

/// record that a configuration was launched
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "record")]
pub struct RecordArgs {
    /// memento identifying the configuration
    #[argh(positional)]
    pub memento: String,
    /// mode the launch ran under: run or debug
    #[argh(positional)]
    pub mode: LaunchMode,
    /// label shown in the history, defaults to the configuration name
    #[argh(option, long = "label")]
    pub label: Option<String>,
}

/// show launch history, most recent first
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "list")]
pub struct ListArgs {
    /// only show this mode
    #[argh(positional)]
    pub mode: Option<LaunchMode>,
}

/// show the most recent launch
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "last")]
pub struct LastArgs {}

/// list registered launch configurations
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "configs")]
pub struct ConfigsArgs {}
