mod error;
mod header;
mod patch;
mod subtype;

use crate::header::{flag_name, set_flag_bits, MachHeader};
use crate::patch::{Outcome, Patcher};
use crate::subtype::{name_of, ArmSubtype};
use anyhow::Context;
use clap::{error::ErrorKind, Parser};
use crossterm::style::Stylize;
use inquire::Confirm;
use std::process::exit;

/// Rewrite the cpu subtype of a 32-bit ARM Mach-O binary in place
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// The Mach-O file to be modified in place
    #[arg(required_unless_present = "list")]
    input_file: Option<String>,
    /// New cpu subtype, by name (e.g. armv7s) or by its decimal code
    #[arg(required_unless_present = "list")]
    new_subtype: Option<String>,
    /// Ask for confirmation before modifying the file
    #[arg(long, short)]
    interactive: bool,
    /// Only report what would be written
    #[arg(long, short('n'))]
    dry_run: bool,
    /// List the known ARM cpu subtypes and exit
    #[arg(long, exclusive = true)]
    list: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            exit(code);
        }
    };

    if let Err(e) = args.run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        exit(1);
    }
}

fn describe_subtype(cpu_sub_type: u32) -> String {
    format!("{} ({})", cpu_sub_type, name_of(cpu_sub_type))
}

fn describe_flags(flags: u32) -> String {
    let bits = set_flag_bits(flags);
    if bits.is_empty() {
        return "-".to_string();
    }

    bits.iter()
        .map(|&bit| match flag_name(bit) {
            Some(name) => format!("{} ({})", bit, name),
            None => bit.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_header(header: &MachHeader) {
    let cpu_type = match header.cpu() {
        Some(cpu) => format!("{} ({})", header.cpu_type, cpu.name()),
        None => header.cpu_type.to_string(),
    };
    println!(
        "cpu type: {}  cpu subtype: {}  bit flags set: {}",
        cpu_type.red(),
        describe_subtype(header.cpu_sub_type).red(),
        describe_flags(header.flags)
    );
}

fn list_subtypes() {
    for subtype in ArmSubtype::ALL {
        println!("{:>3}  {}", subtype.code(), subtype.name().green());
    }
}

impl Args {
    fn ask_for_confirmation(&self, msg: &str) -> anyhow::Result<bool> {
        if !self.interactive {
            return Ok(true);
        }

        Confirm::new(msg)
            .with_default(true)
            .prompt()
            .context("confirmation prompt failed")
    }

    fn run(&self) -> anyhow::Result<()> {
        if self.list {
            list_subtypes();
            return Ok(());
        }

        let (Some(input_file), Some(new_subtype)) = (&self.input_file, &self.new_subtype) else {
            anyhow::bail!("missing <INPUT_FILE> or <NEW_SUBTYPE>");
        };

        // Resolve before touching the file so a bad argument never opens it.
        let cpu_sub_type = subtype::resolve(new_subtype)?;

        let mut patcher = Patcher::open(input_file)?;
        print_header(patcher.header());

        if !patcher.header().is_arm() {
            println!("{}", "error: not an arm binary!".yellow());
            return Ok(());
        }

        if self.dry_run {
            println!(
                "would set cpu subtype to: {}",
                describe_subtype(cpu_sub_type).red()
            );
            return Ok(());
        }

        if !self.ask_for_confirmation(&format!(
            "Input file `{}` will be modified in place, continue?",
            input_file
        ))? {
            return Ok(());
        }

        if let Outcome::Patched { previous, header } = patcher
            .set_cpu_subtype(cpu_sub_type)
            .with_context(|| format!("patching `{}`", input_file))?
        {
            println!(
                "set cpu subtype to: {} (was {})",
                describe_subtype(header.cpu_sub_type).red(),
                describe_subtype(previous)
            );
            println!("{}", "Done!".green().bold());
        }

        Ok(())
    }
}
