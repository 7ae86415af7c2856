use std::str::FromStr;

use color_eyre::{
    eyre::{bail, eyre},
    Result,
};
use convert_case::{Case, Converter};
use runo::{card::CardColor, uno::InputEvent};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, Display, EnumIter, PartialEq, Eq)]
pub enum Command {
    Mode,
    Select,
    Discard,
    Draw,
    Pass,
    Color,
    Help,
    Quit,
}

/// A parsed line of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line {
    Event(InputEvent),
    Help,
    Quit,
}

impl Command {
    pub fn keyword(&self) -> String {
        let converter = Converter::new()
            .from_case(Case::Pascal)
            .to_case(Case::Kebab);
        converter.convert(format!("{self}"))
    }

    fn usage(&self) -> &'static str {
        match self {
            Command::Mode => "<2|4>      start a game with that many seats",
            Command::Select => "<index>  pick a card from your hand",
            Command::Discard => "        play the selected card",
            Command::Draw => "           draw one card",
            Command::Pass => "           end your turn after drawing",
            Command::Color => "<color>   name the color for your wild",
            Command::Help => "           show this list",
            Command::Quit => "           leave the table",
        }
    }

    pub fn help() -> String {
        Command::iter()
            .map(|command| format!("  {} {}", command.keyword(), command.usage()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl FromStr for Line {
    type Err = color_eyre::Report;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            bail!("Type a command, or `help` to list them");
        };
        let command = Command::iter()
            .find(|command| command.keyword().eq_ignore_ascii_case(word))
            .ok_or_else(|| eyre!("Unknown command `{word}`, try `help`"))?;
        let argument = words.next();

        let line = match command {
            Command::Mode => Line::Event(InputEvent::ModeChosen(parse_number(argument)?)),
            Command::Select => Line::Event(InputEvent::CardClicked(parse_number(argument)?)),
            Command::Discard => Line::Event(InputEvent::DiscardPileClicked),
            Command::Draw => Line::Event(InputEvent::DrawPileClicked),
            Command::Pass => Line::Event(InputEvent::PassClicked),
            Command::Color => {
                let argument = argument.ok_or_else(|| eyre!("Name a color"))?;
                let color = CardColor::from_str(argument)
                    .map_err(|_| eyre!("`{argument}` is not a color"))?;
                Line::Event(InputEvent::ColorChosen(color))
            }
            Command::Help => Line::Help,
            Command::Quit => Line::Quit,
        };
        Ok(line)
    }
}

fn parse_number(argument: Option<&str>) -> Result<usize> {
    let argument = argument.ok_or_else(|| eyre!("A number is missing"))?;
    argument
        .parse()
        .map_err(|_| eyre!("`{argument}` is not a number"))
}
