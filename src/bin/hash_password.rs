use std::io::{self};

use clap::Parser;

use polimoney::{PasswordHash, ValidatedPassword};

/// Create the bcrypt hash of a new viewer password for `VIEWER_PASSWORD_HASH`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The bcrypt cost factor.
    #[arg(long, default_value_t = PasswordHash::DEFAULT_COST)]
    cost: u32,
}

fn main() {
    let args = Args::parse();

    if let Some(password_hash) = get_new_password_hash(args.cost) {
        println!("{password_hash}");
    }
}

fn get_new_password_hash(cost: u32) -> Option<PasswordHash> {
    loop {
        eprintln!();

        let first_password = prompt_password("Enter a new viewer password: ")?;

        let validated_password = match ValidatedPassword::new(&first_password) {
            Ok(password) => password,
            Err(error) => {
                print_error(error);
                continue;
            }
        };

        let second_password = prompt_password("Enter the same password again: ")?;

        if first_password != second_password {
            print_error("Passwords must match, try again.");
            continue;
        }

        match PasswordHash::new(validated_password, cost) {
            Ok(password_hash) => return Some(password_hash),
            Err(error) => {
                print_error(format!("Could not hash password: {error}. Try again."));
                continue;
            }
        }
    }
}

/// Returns `None` on EOF or when stdin cannot be read.
fn prompt_password(prompt: &str) -> Option<String> {
    match rpassword::prompt_password(prompt) {
        Ok(string) => Some(string),
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => None,
        Err(error) => {
            print_error(format!("Could not read password from stdin: {error}"));
            None
        }
    }
}

fn print_error(error: impl ToString) {
    eprintln!("\x1b[31;1m{}\x1b[0m", error.to_string());
}
