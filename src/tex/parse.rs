use crate::{
    foundation::error::{BellcurveError, BellcurveResult},
    tex::ast::{AtomClass, MathNode},
};

/// Parse a LaTeX math-mode subset into a [`MathNode`] tree.
///
/// Supported: groups, `^`/`_` scripts, `\frac`, `\sqrt`, `\left`/`\right`, greek letters,
/// `\cdot`, `\times`, `\pm`, `\infty`, the operator names `\exp`/`\ln`/`\log`, and the
/// spacing commands `\,`, `\;`, `\!`, `\quad`. Whitespace is ignored as in TeX math mode.
pub fn parse_tex(src: &str) -> BellcurveResult<MathNode> {
    let mut p = Parser {
        chars: src.chars().collect(),
        pos: 0,
    };
    let row = p.parse_row(Terminator::End)?;
    Ok(row)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Terminator {
    End,
    Brace,
    Right,
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn err(&self, msg: impl std::fmt::Display) -> BellcurveError {
        BellcurveError::typeset(format!("{msg} at offset {}", self.pos))
    }

    fn parse_row(&mut self, term: Terminator) -> BellcurveResult<MathNode> {
        let mut items: Vec<MathNode> = Vec::new();
        loop {
            self.skip_ws();
            let Some(c) = self.peek() else {
                if term == Terminator::End {
                    break;
                }
                return Err(self.err(match term {
                    Terminator::Brace => "unclosed '{'",
                    _ => "missing \\right",
                }));
            };
            match c {
                '}' => {
                    if term != Terminator::Brace {
                        return Err(self.err("unexpected '}'"));
                    }
                    self.pos += 1;
                    break;
                }
                '^' | '_' => {
                    self.pos += 1;
                    let arg = self.parse_arg()?;
                    let prev = items.pop().unwrap_or(MathNode::Row(Vec::new()));
                    items.push(attach_script(prev, arg, c == '^').map_err(|m| self.err(m))?);
                }
                '\\' if self.command_ahead("right") => {
                    if term != Terminator::Right {
                        return Err(self.err("\\right without matching \\left"));
                    }
                    break;
                }
                _ => items.push(self.parse_atom()?),
            }
        }
        Ok(MathNode::Row(items))
    }

    fn command_ahead(&self, name: &str) -> bool {
        let mut i = self.pos + 1;
        for expected in name.chars() {
            if self.chars.get(i) != Some(&expected) {
                return false;
            }
            i += 1;
        }
        !self.chars.get(i).is_some_and(char::is_ascii_alphabetic)
    }

    fn parse_arg(&mut self) -> BellcurveResult<MathNode> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.err("missing argument")),
            Some('}') => Err(self.err("missing argument")),
            Some(_) => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> BellcurveResult<MathNode> {
        let Some(c) = self.bump() else {
            return Err(self.err("unexpected end of input"));
        };
        match c {
            '{' => self.parse_row(Terminator::Brace),
            '\\' => self.parse_command(),
            _ => Ok(glyph_for_char(c)),
        }
    }

    fn read_command_name(&mut self) -> BellcurveResult<String> {
        let Some(first) = self.bump() else {
            return Err(self.err("dangling '\\'"));
        };
        if !first.is_ascii_alphabetic() {
            return Ok(first.to_string());
        }
        let mut name = String::from(first);
        while let Some(c) = self.peek().filter(char::is_ascii_alphabetic) {
            name.push(c);
            self.pos += 1;
        }
        Ok(name)
    }

    fn parse_command(&mut self) -> BellcurveResult<MathNode> {
        let name = self.read_command_name()?;
        match name.as_str() {
            "frac" => {
                let num = self.parse_arg()?;
                let den = self.parse_arg()?;
                Ok(MathNode::Frac {
                    num: Box::new(num),
                    den: Box::new(den),
                })
            }
            "sqrt" => {
                self.skip_ws();
                if self.peek() == Some('[') {
                    return Err(self.err("\\sqrt with an index is not supported"));
                }
                Ok(MathNode::Sqrt(Box::new(self.parse_arg()?)))
            }
            "left" => {
                let open = self.parse_delimiter()?;
                let body = self.parse_row(Terminator::Right)?;
                // parse_row stops in front of `\right`.
                self.pos += 1;
                let _ = self.read_command_name()?;
                let close = self.parse_delimiter()?;
                Ok(MathNode::Delimited {
                    open,
                    close,
                    body: Box::new(body),
                })
            }
            "," => Ok(MathNode::Space(3.0 / 18.0)),
            ":" | ">" => Ok(MathNode::Space(4.0 / 18.0)),
            ";" => Ok(MathNode::Space(5.0 / 18.0)),
            "!" => Ok(MathNode::Space(-3.0 / 18.0)),
            " " => Ok(MathNode::Space(0.33)),
            "quad" => Ok(MathNode::Space(1.0)),
            "qquad" => Ok(MathNode::Space(2.0)),
            "{" | "}" => Ok(MathNode::Glyph {
                ch: name.chars().next().unwrap_or('{'),
                class: if name == "{" {
                    AtomClass::Open
                } else {
                    AtomClass::Close
                },
                italic: false,
            }),
            "cdot" => Ok(bin('⋅')),
            "times" => Ok(bin('×')),
            "pm" => Ok(bin('±')),
            "leq" | "le" => Ok(rel('≤')),
            "geq" | "ge" => Ok(rel('≥')),
            "neq" | "ne" => Ok(rel('≠')),
            "approx" => Ok(rel('≈')),
            "infty" => Ok(ord('∞', false)),
            "exp" | "ln" | "log" | "sin" | "cos" => Ok(MathNode::Row(
                name.chars().map(|c| ord(c, false)).collect(),
            )),
            other => match greek(other) {
                Some(ch) => Ok(ord(ch, ch.is_lowercase())),
                None => Err(self.err(format!("unknown command \\{other}"))),
            },
        }
    }

    fn parse_delimiter(&mut self) -> BellcurveResult<Option<char>> {
        self.skip_ws();
        match self.bump() {
            Some('.') => Ok(None),
            Some(c @ ('(' | ')' | '[' | ']' | '|')) => Ok(Some(c)),
            Some('\\') => match self.read_command_name()?.as_str() {
                "{" => Ok(Some('{')),
                "}" => Ok(Some('}')),
                "|" => Ok(Some('‖')),
                other => Err(self.err(format!("unsupported delimiter \\{other}"))),
            },
            Some(c) => Err(self.err(format!("unsupported delimiter '{c}'"))),
            None => Err(self.err("missing delimiter")),
        }
    }
}

fn attach_script(prev: MathNode, arg: MathNode, is_sup: bool) -> Result<MathNode, &'static str> {
    match prev {
        MathNode::Scripts { base, sup, sub } => {
            let (sup, sub) = match (is_sup, sup, sub) {
                (true, Some(_), _) => return Err("double superscript"),
                (false, _, Some(_)) => return Err("double subscript"),
                (true, None, sub) => (Some(Box::new(arg)), sub),
                (false, sup, None) => (sup, Some(Box::new(arg))),
            };
            Ok(MathNode::Scripts { base, sup, sub })
        }
        base => {
            let arg = Some(Box::new(arg));
            let (sup, sub) = if is_sup { (arg, None) } else { (None, arg) };
            Ok(MathNode::Scripts {
                base: Box::new(base),
                sup,
                sub,
            })
        }
    }
}

fn ord(ch: char, italic: bool) -> MathNode {
    MathNode::Glyph {
        ch,
        class: AtomClass::Ord,
        italic,
    }
}

fn bin(ch: char) -> MathNode {
    MathNode::Glyph {
        ch,
        class: AtomClass::Bin,
        italic: false,
    }
}

fn rel(ch: char) -> MathNode {
    MathNode::Glyph {
        ch,
        class: AtomClass::Rel,
        italic: false,
    }
}

fn glyph_for_char(c: char) -> MathNode {
    match c {
        '+' => bin('+'),
        '-' => bin('−'),
        '*' => bin('∗'),
        '=' | '<' | '>' => rel(c),
        '(' | '[' => MathNode::Glyph {
            ch: c,
            class: AtomClass::Open,
            italic: false,
        },
        ')' | ']' => MathNode::Glyph {
            ch: c,
            class: AtomClass::Close,
            italic: false,
        },
        ',' | ';' => MathNode::Glyph {
            ch: c,
            class: AtomClass::Punct,
            italic: false,
        },
        c if c.is_ascii_alphabetic() => ord(c, true),
        c => ord(c, false),
    }
}

fn greek(name: &str) -> Option<char> {
    Some(match name {
        "alpha" => 'α',
        "beta" => 'β',
        "gamma" => 'γ',
        "delta" => 'δ',
        "epsilon" => 'ϵ',
        "varepsilon" => 'ε',
        "zeta" => 'ζ',
        "eta" => 'η',
        "theta" => 'θ',
        "iota" => 'ι',
        "kappa" => 'κ',
        "lambda" => 'λ',
        "mu" => 'μ',
        "nu" => 'ν',
        "xi" => 'ξ',
        "pi" => 'π',
        "rho" => 'ρ',
        "sigma" => 'σ',
        "tau" => 'τ',
        "upsilon" => 'υ',
        "phi" => 'ϕ',
        "varphi" => 'φ',
        "chi" => 'χ',
        "psi" => 'ψ',
        "omega" => 'ω',
        "Gamma" => 'Γ',
        "Delta" => 'Δ',
        "Theta" => 'Θ',
        "Lambda" => 'Λ',
        "Xi" => 'Ξ',
        "Pi" => 'Π',
        "Sigma" => 'Σ',
        "Phi" => 'Φ',
        "Psi" => 'Ψ',
        "Omega" => 'Ω',
        _ => return None,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/tex/parse.rs"]
mod tests;
