use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "campus",
    bin_name = "campus",
    version,
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "A local student directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Campus data directory (overrides CAMPUS_HOME)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Core,
    Student,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::Core => "Core Commands:",
            CommandGroup::Student => "Per-Student Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "search" | "add" => Some(CommandGroup::Core),
            "view" | "edit" | "delete" => Some(CommandGroup::Student),
            "avatars" | "init" | "config" | "help" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::Core, CommandGroup::Student, CommandGroup::Misc]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("campus {version}\n"));
    output.push_str("A local student directory\n");
    output.push('\n');
    output.push_str("Usage: campus [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("      --home <DIR>  Campus data directory (overrides CAMPUS_HOME)\n");
    output.push_str("  -v, --verbose     Verbose output\n");
    output.push_str("  -h, --help        Print help\n");
    output.push_str("  -V, --version     Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for the parsed subcommand, or the grouped help when there is none.
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::Core(c)) => match c {
            CoreCommands::List { .. } => "list",
            CoreCommands::Search { .. } => "search",
            CoreCommands::Add { .. } => "add",
        },
        Some(Commands::Student(c)) => match c {
            StudentCommands::View { .. } => "view",
            StudentCommands::Edit { .. } => "edit",
            StudentCommands::Delete { .. } => "delete",
        },
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Avatars => "avatars",
            MiscCommands::Init => "init",
            MiscCommands::Config { .. } => "config",
            MiscCommands::Help { .. } => "help",
        },
        None => {
            print_grouped_help();
            return;
        }
    };

    print_help_for_command(name);
}

pub fn print_help_for_command(name: &str) {
    let mut cmd = Cli::command();

    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }

    eprintln!("Unknown command: {}", name);
    eprintln!();
    print_grouped_help();
}

/// Where a new avatar comes from. At most one may be given.
#[derive(Args, Debug, Default, Clone)]
#[group(multiple = false)]
pub struct AvatarArgs {
    /// Use default avatar N (see `campus avatars`)
    #[arg(long, value_name = "N")]
    pub avatar: Option<usize>,

    /// Import an image from the gallery
    #[arg(long, value_name = "PATH")]
    pub photo: Option<PathBuf>,

    /// Import an image taken with the camera
    #[arg(long, value_name = "PATH")]
    pub camera: Option<PathBuf>,
}

impl AvatarArgs {
    pub fn is_set(&self) -> bool {
        self.avatar.is_some() || self.photo.is_some() || self.camera.is_some()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Core(CoreCommands),

    #[command(flatten)]
    Student(StudentCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum CoreCommands {
    /// List students
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Only show students whose name or email contains TERM
        #[arg(short, long, value_name = "TERM")]
        search: Option<String>,
    },

    /// Search students by name or email
    #[command(display_order = 2)]
    Search {
        /// Search words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },

    /// Add a student
    #[command(alias = "new", display_order = 3)]
    Add {
        name: String,

        email: String,

        /// Role label (defaults to the configured default-role)
        #[arg(long)]
        role: Option<String>,

        #[command(flatten)]
        avatar: AvatarArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum StudentCommands {
    /// Show one student
    #[command(alias = "v", display_order = 10)]
    View { id: i64 },

    /// Edit a student
    #[command(alias = "e", display_order = 11)]
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Role label (the current role is kept otherwise)
        #[arg(long)]
        role: Option<String>,

        #[command(flatten)]
        avatar: AvatarArgs,

        /// Remove the avatar
        #[arg(long, conflicts_with_all = ["avatar", "photo", "camera"])]
        clear_avatar: bool,
    },

    /// Delete one or more students
    #[command(alias = "rm", display_order = 12)]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<i64>,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// List the default avatars
    #[command(display_order = 30)]
    Avatars,

    /// Create the data directory and database
    #[command(display_order = 31)]
    Init,

    /// Get or set configuration
    #[command(display_order = 32)]
    Config {
        /// Configuration key (e.g., default-role)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Print help for campus or a subcommand
    #[command(display_order = 33)]
    Help {
        /// Subcommand to get help for
        command: Option<String>,
    },
}
