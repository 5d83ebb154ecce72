//! Reader for the plain-text scene format.
//!
//! ```text
//! // comments run to the end of the line
//! renderSettings {
//!     resolution 640 480
//!     fps 24
//!     samples 9
//!     loop
//! }
//!
//! keyframe 2.0 {
//!     background 0.1 0.1 0.2
//!     camera main { position 0 1 5  lookat 0 0 0  up 0 1 0  fov 60 }
//!     light key { position 5 5 5  diffuse 1 1 1  specular 1 1 1 }
//!     sphere ball {
//!         position 0 0 0
//!         radius 1
//!         diffuse 0.8 0.1 0.1
//!     }
//! }
//! ```
//!
//! Keywords and property names are case-insensitive. A property takes the
//! numbers that follow it on the same line.

use std::collections::VecDeque;

use log::{debug, warn};

use crate::{
    geometry::ShapeKind,
    scene::{Animation, AnimationBuilder, Properties, SceneError},
    vec3::Vec3,
};

#[derive(Clone, Debug, PartialEq)]
struct Token {
    text: String,
    line: usize,
}

impl Token {
    fn is(&self, s: &str) -> bool {
        self.text.eq_ignore_ascii_case(s)
    }

    fn lower(&self) -> String {
        self.text.to_ascii_lowercase()
    }
}

/// Splits `content` into tokens. Braces are always tokens of their own and
/// double quotes group words into a single token.
fn tokenize(content: &str) -> VecDeque<Token> {
    let mut tokens = VecDeque::new();

    for (index, line) in content.lines().enumerate() {
        let line_number = index + 1;
        let mut chars = line.char_indices().peekable();

        while let Some(&(start, c)) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
            } else if c == '{' || c == '}' {
                chars.next();
                tokens.push_back(Token {
                    text: c.to_string(),
                    line: line_number,
                });
            } else if c == '"' {
                chars.next();
                let mut text = String::new();
                for (_, c) in chars.by_ref() {
                    if c == '"' {
                        break;
                    }
                    text.push(c);
                }
                tokens.push_back(Token {
                    text,
                    line: line_number,
                });
            } else if line[start..].starts_with("//") {
                break;
            } else {
                let mut end = line.len();
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_whitespace() || c == '{' || c == '}' {
                        end = i;
                        break;
                    }
                    chars.next();
                }
                tokens.push_back(Token {
                    text: line[start..end].to_owned(),
                    line: line_number,
                });
            }
        }
    }

    tokens
}

struct Parser {
    tokens: VecDeque<Token>,
    builder: AnimationBuilder,
}

impl Parser {
    fn next(&mut self) -> Result<Token, SceneError> {
        self.tokens.pop_front().ok_or(SceneError::UnexpectedEof)
    }

    fn expect_open(&mut self) -> Result<(), SceneError> {
        let token = self.next()?;
        if token.text == "{" {
            Ok(())
        } else {
            Err(SceneError::Unexpected {
                line: token.line,
                expected: "{",
                found: token.text,
            })
        }
    }

    fn number(&mut self) -> Result<f64, SceneError> {
        let token = self.next()?;
        token.text.parse().map_err(|_| SceneError::InvalidNumber {
            line: token.line,
            token: token.text,
        })
    }

    fn integer(&mut self) -> Result<u32, SceneError> {
        let token = self.next()?;
        token.text.parse().map_err(|_| SceneError::InvalidNumber {
            line: token.line,
            token: token.text,
        })
    }

    fn vector(&mut self) -> Result<Vec3<f64>, SceneError> {
        Ok(Vec3::new(self.number()?, self.number()?, self.number()?))
    }

    /// Consumes the numeric tokens that follow on `line`.
    fn values_on_line(&mut self, line: usize) -> Vec<f64> {
        let mut values = Vec::new();

        while let Some(token) = self.tokens.front() {
            if token.line != line {
                break;
            }
            match token.text.parse::<f64>() {
                Ok(value) => values.push(value),
                Err(..) => break,
            }
            self.tokens.pop_front();
        }

        values
    }

    /// Drops the rest of `line`, stopping short of a closing brace.
    fn discard_line(&mut self, line: usize) {
        while let Some(token) = self.tokens.front() {
            if token.line != line || token.text == "}" {
                break;
            }
            self.tokens.pop_front();
        }
    }

    /// Skips a `{ ... }` block whose opening brace was already consumed.
    fn skip_block(&mut self) -> Result<(), SceneError> {
        let mut depth = 1;
        while depth > 0 {
            match self.next()?.text.as_str() {
                "{" => depth += 1,
                "}" => depth -= 1,
                _ => {}
            }
        }

        Ok(())
    }

    fn parse(mut self) -> Result<Animation, SceneError> {
        while let Some(token) = self.tokens.pop_front() {
            if token.is("rendersettings") {
                self.render_settings()?;
            } else if token.is("keyframe") {
                self.keyframe()?;
            } else {
                warn!("line {}: unknown token `{}`", token.line, token.text);
            }
        }

        self.builder.build()
    }

    fn render_settings(&mut self) -> Result<(), SceneError> {
        debug!("Parsing render settings");
        self.expect_open()?;

        loop {
            let token = self.next()?;
            match token.lower().as_str() {
                "}" => break,
                "resolution" => {
                    let width = self.integer()?;
                    let height = self.integer()?;
                    self.builder.resolution(width, height);
                }
                "fps" => {
                    let fps = self.integer()?;
                    self.builder.fps(fps);
                }
                "maxdepth" => {
                    let depth = self.integer()?;
                    self.builder.max_depth(depth);
                }
                "samples" => {
                    let samples = self.number()?;
                    self.builder.samples(samples);
                }
                "loop" => {
                    self.builder.looping(true);
                }
                _ => warn!("line {}: unknown render setting `{}`", token.line, token.text),
            }
        }

        Ok(())
    }

    fn keyframe(&mut self) -> Result<(), SceneError> {
        let offset = match self.tokens.front() {
            Some(token) if token.text != "{" => self.number()?,
            _ => 0.0,
        };
        self.builder.keyframe(offset);
        self.expect_open()?;

        loop {
            let token = self.next()?;
            let keyword = token.lower();

            if keyword == "}" {
                break;
            }
            if keyword == "background" {
                let color = self.vector()?;
                self.builder.background(color);
                continue;
            }

            let name = self.next()?.text;
            self.expect_open()?;

            if keyword == "camera" {
                self.properties(|builder| builder.camera(&name))?;
            } else if keyword == "light" {
                self.properties(|builder| builder.light(&name))?;
            } else if let Some(kind) = ShapeKind::from_keyword(&keyword) {
                self.properties(|builder| builder.object(kind, &name))?;
            } else {
                warn!("line {}: unknown object type `{}`", token.line, token.text);
                self.skip_block()?;
            }
        }

        Ok(())
    }

    /// Applies `key values...` lines to the entity picked by `target` until
    /// the closing brace.
    fn properties<T, F>(&mut self, mut target: F) -> Result<(), SceneError>
    where
        T: Properties + ?Sized,
        F: FnMut(&mut AnimationBuilder) -> &mut T,
    {
        loop {
            let token = self.next()?;
            if token.text == "}" {
                return Ok(());
            }

            let key = token.lower();
            let values = self.values_on_line(token.line);
            let known = target(&mut self.builder)
                .apply(&key, &values)
                .map_err(|source| SceneError::Property {
                    line: token.line,
                    source,
                })?;

            if !known {
                warn!("line {}: unknown property `{}`", token.line, token.text);
                self.discard_line(token.line);
            }
        }
    }
}

/// Parses a text scene into an [`Animation`].
pub fn parse(content: &str) -> Result<Animation, SceneError> {
    Parser {
        tokens: tokenize(content),
        builder: AnimationBuilder::new(),
    }
    .parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Shape;

    const SCENE: &str = r#"
        // two keyframes, the ball moves up
        RenderSettings {
            resolution 64 48
            fps 10
            maxDepth 2
            samples 4
            loop
        }

        keyframe 1.5 {
            background 0.1 0.2 0.3
            camera "main cam" {
                position 0 0 5
                lookat 0 0 0
            }
            light key { position 5 5 5  diffuse 1 1 1 }
            sphere ball {
                position 0 0 0
                radius 1
                diffuse 0.8 0.1 0.1 // red
            }
            plane floor {
                point 0 -1 0
                normal 0 2 0
            }
        }

        keyframe 1 {
            sphere ball { position 0 1 0 }
        }
    "#;

    #[test]
    fn tokenizer_splits_braces_and_quotes() {
        let tokens: Vec<_> = tokenize("camera \"a b\" {x 1}// c\n}")
            .into_iter()
            .map(|t| (t.text, t.line))
            .collect();

        assert_eq!(
            vec![
                ("camera".to_owned(), 1),
                ("a b".to_owned(), 1),
                ("{".to_owned(), 1),
                ("x".to_owned(), 1),
                ("1".to_owned(), 1),
                ("}".to_owned(), 1),
                ("}".to_owned(), 2),
            ],
            tokens
        );
    }

    #[test]
    fn parses_settings_and_keyframes() {
        let animation = parse(SCENE).unwrap();

        assert_eq!((64, 48), (animation.width, animation.height));
        assert_eq!(10, animation.fps);
        assert_eq!(2, animation.max_depth);
        assert_eq!(2, animation.samples);
        assert!(animation.looping);
        assert_eq!(2, animation.keyframes.len());

        let first = &animation.keyframes[0];
        assert_eq!(1.5, first.time_offset);
        assert_eq!(Vec3::new(0.1, 0.2, 0.3), first.background);
        assert_eq!("main cam", first.camera_name);
        assert_eq!(Vec3::new(0.0, 0.0, 5.0), first.camera.position);
        assert_eq!(&["ball", "floor"], first.objects.names());
        assert_eq!(Vec3::new(0.8, 0.1, 0.1), first.objects.values()[0].material.diffuse);

        match first.objects.values()[1].shape {
            Shape::Plane(p) => assert_eq!(Vec3::new(0.0, 1.0, 0.0), p.normal()),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn later_keyframes_patch_earlier_ones() {
        let animation = parse(SCENE).unwrap();
        let second = &animation.keyframes[1];

        assert_eq!(1.0, second.time_offset);
        assert_eq!(Vec3::new(0.1, 0.2, 0.3), second.background);
        assert_eq!(2, second.objects.len());

        let ball = &second.objects.values()[0];
        match ball.shape {
            Shape::Sphere(s) => {
                assert_eq!(Vec3::new(0.0, 1.0, 0.0), s.center);
                assert_eq!(1.0, s.radius);
            }
            other => panic!("unexpected shape {:?}", other),
        }
        assert_eq!(Vec3::new(0.8, 0.1, 0.1), ball.material.diffuse);
    }

    #[test]
    fn unknown_entries_are_skipped() {
        let animation = parse(
            "bogus\nkeyframe { cube c { size 2 } sphere s {\n wobble 3 \n radius 2\n } }",
        )
        .unwrap();

        let frame = &animation.keyframes[0];
        assert_eq!(0.0, frame.time_offset);
        assert_eq!(&["s"], frame.objects.names());
    }

    #[test]
    fn wrong_arity_reports_line() {
        let err = parse("keyframe 1 {\n sphere s {\n position 1 2\n }\n}").unwrap_err();

        match err {
            SceneError::Property { line, source } => {
                assert_eq!(3, line);
                assert_eq!("position", source.key);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn truncated_input_is_an_error() {
        match parse("keyframe 1 { sphere s { radius 1") {
            Err(SceneError::UnexpectedEof) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn bad_numbers_are_reported() {
        match parse("renderSettings { fps fast }") {
            Err(SceneError::InvalidNumber { line: 1, token }) => assert_eq!("fast", token),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn zero_width_is_rejected() {
        match parse("renderSettings { resolution 0 4 }\nkeyframe 1 { }") {
            Err(SceneError::InvalidResolution { width: 0, height: 4 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn infinite_offset_is_rejected() {
        assert!(matches!(
            parse("keyframe inf { }"),
            Err(SceneError::InvalidOffset { keyframe: 0, .. })
        ));
    }
}
