//! Terminal writer.
//!
//! Translates a composed [`Frame`] into an ordered list of primitive commands
//! and emits them in one flush. Each row starts with an absolute `MoveTo` so a
//! wide glyph or a terminal auto-wrap can never shift the following rows.
//! Style changes are emitted only at run boundaries.
//!
//! The writer owns no global state; it is a short-lived object per flip.

use crate::style::{Attr, Colour};
use crate::surface::Frame;
use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use std::io::{Write, stdout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo(u16, u16),
    SetStyle(Colour, Attr),
    ResetStyle,
    Print(String),
}

#[derive(Default)]
pub struct Writer {
    cmds: Vec<Command>,
}

impl Writer {
    pub fn new() -> Self {
        Self { cmds: Vec::new() }
    }

    /// Build the command list for a full repaint of `frame`. With `colour`
    /// false every cell is emitted in the terminal default colour.
    pub fn from_frame(frame: &Frame, colour: bool) -> Self {
        let mut w = Writer::new();
        for y in 0..frame.height {
            w.move_to(0, y);
            let mut style: Option<(Colour, Attr)> = None;
            let mut run = String::new();
            for x in 0..frame.width {
                let Some(cell) = frame.cell(x, y) else {
                    continue;
                };
                if cell.continuation {
                    continue;
                }
                let cell_style = (
                    if colour { cell.colour } else { Colour::None },
                    cell.attrs,
                );
                if style != Some(cell_style) {
                    w.print(std::mem::take(&mut run));
                    w.set_style(cell_style.0, cell_style.1);
                    style = Some(cell_style);
                }
                run.push(cell.symbol);
            }
            w.print(run);
            w.reset_style();
        }
        w
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cmds.push(Command::MoveTo(x, y));
    }

    pub fn set_style(&mut self, colour: Colour, attrs: Attr) {
        self.cmds.push(Command::SetStyle(colour, attrs));
    }

    pub fn reset_style(&mut self) {
        self.cmds.push(Command::ResetStyle);
    }

    pub fn print<S: Into<String>>(&mut self, s: S) {
        let s: String = s.into();
        if !s.is_empty() {
            self.cmds.push(Command::Print(s));
        }
    }

    pub fn commands(&self) -> &[Command] {
        &self.cmds
    }

    pub fn flush(self) -> Result<()> {
        let mut out = stdout();
        self.write_to(&mut out)
    }

    pub fn write_to<W: Write>(self, out: &mut W) -> Result<()> {
        for c in self.cmds {
            match c {
                Command::MoveTo(x, y) => {
                    queue!(out, MoveTo(x, y))?;
                }
                Command::SetStyle(colour, attrs) => {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                    if let Some(fg) = colour.to_crossterm() {
                        queue!(out, SetForegroundColor(fg), SetBackgroundColor(Color::Black))?;
                    }
                    if attrs.contains(Attr::BOLD) {
                        queue!(out, SetAttribute(Attribute::Bold))?;
                    }
                    if attrs.contains(Attr::REVERSE) {
                        queue!(out, SetAttribute(Attribute::Reverse))?;
                    }
                    if attrs.contains(Attr::BLINK) {
                        queue!(out, SetAttribute(Attribute::SlowBlink))?;
                    }
                }
                Command::ResetStyle => {
                    queue!(out, SetAttribute(Attribute::Reset))?;
                }
                Command::Print(s) => {
                    queue!(out, Print(s))?;
                }
            }
        }
        out.flush()?;
        Ok(())
    }
}
