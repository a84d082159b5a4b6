use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use notepane_workspace::Side;

#[derive(Parser, Debug)]
#[command(name = "notepane")]
#[command(about = "Inspect and drive a notepane data directory")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config file (defaults to $NOTEPANE_CONFIG, then the platform config dir)
	#[arg(long, short = 'c', value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Data directory holding the JSON collections, overriding the config
	#[arg(long, value_name = "DIR", global = true)]
	pub data_dir: Option<PathBuf>,

	/// Print machine-readable JSON on stdout
	#[arg(long, global = true)]
	pub json: bool,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	/// Subcommand to execute; prints the status when omitted.
	#[command(subcommand)]
	pub command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Show both panes, split mode and floating windows
	Status,
	/// Create a note and open it in the left pane
	New {
		/// Title (defaults to the weekday and date)
		title: Option<String>,
	},
	/// Open a note as if clicked in the sidebar, or in an explicit pane
	Open {
		id: String,
		#[arg(long)]
		side: Option<Side>,
	},
	/// Close a note's tab in one pane
	Close {
		id: String,
		#[arg(long)]
		side: Side,
	},
	/// Drop a tab on the other pane's drop zone
	Drop {
		id: String,
		/// Pane the tab is dragged from
		#[arg(long)]
		from: Side,
	},
	/// Copy a note and open the copy in the left pane
	Duplicate { id: String },
	/// Write every note to a JSON file
	Export {
		#[arg(value_name = "FILE")]
		path: PathBuf,
	},
	/// Add the notes of an exported JSON file under new ids
	Import {
		#[arg(value_name = "FILE")]
		path: PathBuf,
	},
	/// Turn split mode on or off
	Split { state: Toggle },
	/// Swap the content of both panes
	Swap,
	/// Pin or unpin an open tab
	Pin { id: String },
	/// Manage floating windows
	Window {
		#[command(subcommand)]
		action: WindowAction,
	},
	/// Move a note or folder to the trash
	Trash { id: String },
	/// Restore a trashed note or folder
	Restore { id: String },
	/// List trashed items
	TrashList,
	/// Close every tab and return to the home view
	Home,
	/// Search titles, tags, folder names and content
	Search {
		#[arg(required = true, num_args = 1..)]
		query: Vec<String>,
	},
	/// Replace a note's content, recording an undo entry
	Edit {
		id: String,
		content: String,
		/// Caret offset after the edit
		#[arg(long)]
		offset: Option<usize>,
	},
	/// Step a note's history back
	Undo { id: String },
	/// Step a note's history forward
	Redo { id: String },
	/// List folders as a tree
	Folders,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
	On,
	Off,
}

/// Floating window subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WindowAction {
	/// Open (or focus) a note's window
	Open { id: String },
	/// Minimize a window to the dock
	Minimize { id: String },
	/// Restore a minimized window
	Restore { id: String },
	/// Close a window
	Close { id: String },
}
