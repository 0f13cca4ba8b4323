use std::fmt;

use crate::context::{Context, Mods};
use crate::render::{self, mods_to_suffixes};
use crate::settings::Settings;

/// Entry point: a new block named `name`, used verbatim.
pub fn block(name: &str) -> Block {
    Block {
        ctx: Context::new(name),
    }
}

/// One positional argument to [`Block::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Appended to the name after the element separator. Empty names are ignored.
    Element(String),
    /// Pushed as one modifier spec.
    Mods(Mods),
    Skip,
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Element(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Element(s)
    }
}

impl From<&String> for Arg {
    fn from(s: &String) -> Self {
        Arg::Element(s.clone())
    }
}

impl From<Mods> for Arg {
    fn from(mods: Mods) -> Self {
        Arg::Mods(mods)
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(v: Option<T>) -> Self {
        v.map_or(Arg::Skip, Into::into)
    }
}

/// Anything that can be mixed into a block's class list.
#[derive(Debug, Clone, PartialEq)]
pub enum Mix {
    Token(String),
    Tokens(Vec<String>),
    /// Rendered as `key` or `key + modValue + value` per truthy entry.
    Mods(Mods),
    /// Rendered to its full class string when mixed in.
    Block(Block),
    None,
}

impl From<&str> for Mix {
    fn from(s: &str) -> Self {
        Mix::Token(s.to_string())
    }
}

impl From<String> for Mix {
    fn from(s: String) -> Self {
        Mix::Token(s)
    }
}

impl From<Vec<String>> for Mix {
    fn from(tokens: Vec<String>) -> Self {
        Mix::Tokens(tokens)
    }
}

impl From<Vec<&str>> for Mix {
    fn from(tokens: Vec<&str>) -> Self {
        Mix::Tokens(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Mix {
    fn from(tokens: &[&str]) -> Self {
        Mix::Tokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Mix {
    fn from(tokens: [&str; N]) -> Self {
        Mix::Tokens(tokens.iter().map(|t| t.to_string()).collect())
    }
}

impl From<Mods> for Mix {
    fn from(mods: Mods) -> Self {
        Mix::Mods(mods)
    }
}

impl From<Block> for Mix {
    fn from(b: Block) -> Self {
        Mix::Block(b)
    }
}

impl From<&Block> for Mix {
    fn from(b: &Block) -> Self {
        Mix::Block(b.clone())
    }
}

impl<T: Into<Mix>> From<Option<T>> for Mix {
    fn from(v: Option<T>) -> Self {
        v.map_or(Mix::None, Into::into)
    }
}

/// An immutable class-name builder.
///
/// Every operation returns a new `Block` and leaves `self` untouched, so a block can
/// be shared as a prefix of many chains:
///
/// ```
/// use bem_class_names::{block, Mods};
///
/// let menu = block("menu");
/// let item = menu.elem("item").mods(Mods::new().set("theme", "dark"));
/// assert_eq!(item.to_string(), "menu__item menu__item_theme_dark");
/// assert_eq!(menu.to_string(), "menu");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    ctx: Context,
}

impl Block {
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Apply elements and modifier specs left to right.
    ///
    /// The element separator is read from the process-wide settings now, not at
    /// render time.
    pub fn apply<I, A>(&self, args: I) -> Block
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        self.apply_with(args, &Settings::current())
    }

    pub fn apply_with<I, A>(&self, args: I, settings: &Settings) -> Block
    where
        I: IntoIterator<Item = A>,
        A: Into<Arg>,
    {
        let mut ctx = self.ctx.clone();
        for arg in args {
            match arg.into() {
                Arg::Element(el) if !el.is_empty() => {
                    ctx.name.push_str(&settings.el);
                    ctx.name.push_str(&el);
                }
                Arg::Mods(mods) => ctx.mods.push(mods),
                Arg::Element(_) | Arg::Skip => {}
            }
        }
        Block { ctx }
    }

    pub fn elem(&self, name: &str) -> Block {
        self.apply([name])
    }

    pub fn mods(&self, mods: impl Into<Mods>) -> Block {
        self.apply([Arg::Mods(mods.into())])
    }

    /// Append extra class tokens after any existing mixes.
    pub fn mix(&self, value: impl Into<Mix>) -> Block {
        self.mix_with(value, &Settings::current())
    }

    pub fn mix_with(&self, value: impl Into<Mix>, settings: &Settings) -> Block {
        let mut ctx = self.ctx.clone();
        match value.into() {
            Mix::Token(token) if !token.is_empty() => ctx.mixes.push(token),
            Mix::Tokens(tokens) => ctx.mixes.extend(tokens),
            Mix::Mods(mods) => ctx
                .mixes
                .extend(mods_to_suffixes(&mods, "", &settings.mod_value)),
            Mix::Block(nested) => ctx.mixes.push(nested.render(settings)),
            Mix::Token(_) | Mix::None => {}
        }
        Block { ctx }
    }

    /// Merge state flags; a key set again keeps its position and takes the new value.
    pub fn state<I, K>(&self, states: I) -> Block
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        let mut ctx = self.ctx.clone();
        for (key, on) in states {
            ctx.states.insert(key, on);
        }
        Block { ctx }
    }

    pub fn render(&self, settings: &Settings) -> String {
        render::render(&self.ctx, settings)
    }

    /// Render with the current settings and split like `String.prototype.split`.
    pub fn split(&self, separator: Option<&str>, limit: Option<usize>) -> Vec<String> {
        render::split(&self.to_string(), separator, limit)
    }

    /// The rendered class list as space-separated tokens.
    pub fn classes(&self) -> Vec<String> {
        self.split(Some(" "), None)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Settings::current()))
    }
}

impl From<Block> for String {
    fn from(b: Block) -> Self {
        b.to_string()
    }
}
