use std::str::FromStr;

use crate::errors::ClientError;
use crate::state::ProductForm;

pub const HELP: &str = "\
commands:
  refresh                                   reload the product list
  add <name> | <description> | <price>      create a product
  edit <n>                                  open the update form for row n
  save <name> | <description> | <price>     submit the open update form
  save                                      submit the update form as pre-filled
  cancel                                    close the update form
  delete <n>                                delete row n
  clear                                     delete all products
  help                                      show this help
  quit                                      exit";

/// One line of user input. Row numbers are converted to zero-based positions.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Refresh,
    Add(ProductForm),
    Edit(usize),
    /// `None` submits the pre-filled values of the open form.
    Save(Option<ProductForm>),
    Cancel,
    Delete(usize),
    Clear,
    Help,
    Quit,
}

fn parse_row(arg: &str) -> Result<usize, ClientError> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(ClientError::Command(format!("expected a row number, got {arg:?}"))),
    }
}

fn parse_form(arg: &str) -> Result<ProductForm, ClientError> {
    let parts: Vec<&str> = arg.split('|').map(str::trim).collect();
    match parts.as_slice() {
        [name, description, price] => Ok(ProductForm::new(*name, *description, *price)),
        _ => Err(ClientError::Command("expected <name> | <description> | <price>".into())),
    }
}

impl FromStr for Command {
    type Err = ClientError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };
        match verb.to_ascii_lowercase().as_str() {
            "refresh" | "list" => Ok(Command::Refresh),
            "add" => parse_form(rest).map(Command::Add),
            "edit" => parse_row(rest).map(Command::Edit),
            "save" if rest.is_empty() => Ok(Command::Save(None)),
            "save" => parse_form(rest).map(|f| Command::Save(Some(f))),
            "cancel" => Ok(Command::Cancel),
            "delete" => parse_row(rest).map(Command::Delete),
            "clear" => Ok(Command::Clear),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(ClientError::Command(format!("unknown command {other:?}"))),
        }
    }
}
