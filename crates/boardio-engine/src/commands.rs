//! Platform command registry: deferred, name-templated vendor commands.
//!
//! Commands are stored verbatim at registration and rendered only once the
//! external naming service has assigned final signal names.

use boardio_model::Signal;

use crate::error::{EngineError, Result};

/// The external naming service: assigns each elementary signal its final,
/// unique string name. Supplied once at finalize time.
pub trait SignalNamer {
    /// The final name of `signal`, or `None` if the namer cannot name it.
    fn name_of(&self, signal: &Signal) -> Option<String>;
}

impl<F> SignalNamer for F
where
    F: Fn(&Signal) -> Option<String>,
{
    fn name_of(&self, signal: &Signal) -> Option<String> {
        self(signal)
    }
}

/// One bound value of a command template placeholder.
#[derive(Debug, Clone)]
pub enum CommandArg {
    /// A literal string, substituted as-is.
    Literal(String),
    /// An allocated signal, substituted by its final name.
    Signal(Signal),
}

impl From<&str> for CommandArg {
    fn from(v: &str) -> Self {
        CommandArg::Literal(v.to_string())
    }
}

impl From<String> for CommandArg {
    fn from(v: String) -> Self {
        CommandArg::Literal(v)
    }
}

impl From<Signal> for CommandArg {
    fn from(v: Signal) -> Self {
        CommandArg::Signal(v)
    }
}

/// A deferred command: a template with `{placeholder}`s plus its bindings.
#[derive(Debug, Clone)]
pub struct PlatformCommand {
    pub template: String,
    pub args: Vec<(String, CommandArg)>,
}

/// Stores platform commands in registration order and renders them against
/// an external namer.
#[derive(Debug, Default)]
pub struct PlatformCommandRegistry {
    commands: Vec<PlatformCommand>,
}

impl PlatformCommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a command verbatim. Placeholder/binding correspondence is not
    /// checked here; mismatches surface at render time.
    pub fn add(&mut self, template: impl Into<String>, args: Vec<(String, CommandArg)>) {
        self.commands.push(PlatformCommand {
            template: template.into(),
            args,
        });
    }

    /// Render all commands in registration order. Pure: the registry is
    /// unchanged and repeated calls give the same result.
    pub fn render(&self, namer: &dyn SignalNamer) -> Result<Vec<String>> {
        self.commands
            .iter()
            .map(|command| {
                let mut bindings = Vec::with_capacity(command.args.len());
                for (placeholder, arg) in &command.args {
                    let value = match arg {
                        CommandArg::Literal(s) => s.clone(),
                        CommandArg::Signal(signal) => namer.name_of(signal).ok_or_else(|| {
                            EngineError::UnresolvedSignal {
                                signal: signal.name.clone(),
                            }
                        })?,
                    };
                    bindings.push((placeholder.as_str(), value));
                }
                substitute(&command.template, &bindings)
            })
            .collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Substitute `{name}` placeholders. `{{` and `}}` escape literal braces.
fn substitute(template: &str, bindings: &[(&str, String)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut placeholder = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => placeholder.push(c),
                        None => {
                            return Err(EngineError::UnboundPlaceholder {
                                placeholder,
                                template: template.to_string(),
                            })
                        }
                    }
                }
                let value = bindings
                    .iter()
                    .find_map(|(name, value)| (*name == placeholder).then_some(value))
                    .ok_or_else(|| EngineError::UnboundPlaceholder {
                        placeholder: placeholder.clone(),
                        template: template.to_string(),
                    })?;
                out.push_str(value);
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardio_model::{IoSignal, Shape};
    use std::collections::HashMap;

    fn scalar(name: &str) -> Signal {
        match IoSignal::allocate(name, &Shape::Scalar { width: 1 }, None) {
            IoSignal::Scalar(s) => s,
            _ => unreachable!(),
        }
    }

    struct MapNamer(HashMap<boardio_model::SignalId, String>);

    impl SignalNamer for MapNamer {
        fn name_of(&self, signal: &Signal) -> Option<String> {
            self.0.get(&signal.id).cloned()
        }
    }

    #[test]
    fn renders_literals_and_signal_names() {
        let led = scalar("led");
        let mut names = HashMap::new();
        names.insert(led.id, "led_0".to_string());

        let mut registry = PlatformCommandRegistry::new();
        registry.add(
            "set_property PACKAGE_PIN {p} [get_ports {sig}]",
            vec![
                ("p".to_string(), CommandArg::from("H17")),
                ("sig".to_string(), CommandArg::from(led)),
            ],
        );

        let rendered = registry.render(&MapNamer(names)).unwrap();
        assert_eq!(
            rendered,
            vec!["set_property PACKAGE_PIN H17 [get_ports led_0]".to_string()]
        );
    }

    #[test]
    fn renders_in_registration_order_and_is_pure() {
        let mut registry = PlatformCommandRegistry::new();
        registry.add("first {x}", vec![("x".to_string(), CommandArg::from("1"))]);
        registry.add("second {x}", vec![("x".to_string(), CommandArg::from("2"))]);

        let namer = |_: &Signal| -> Option<String> { None };
        let once = registry.render(&namer).unwrap();
        let twice = registry.render(&namer).unwrap();
        assert_eq!(once, vec!["first 1", "second 2"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn unbound_placeholder_reported_with_template() {
        let mut registry = PlatformCommandRegistry::new();
        registry.add("create_clock {clk}", vec![]);

        let namer = |_: &Signal| -> Option<String> { None };
        let err = registry.render(&namer).unwrap_err();
        match err {
            EngineError::UnboundPlaceholder { placeholder, template } => {
                assert_eq!(placeholder, "clk");
                assert!(template.contains("create_clock"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn unresolved_signal_reported() {
        let mut registry = PlatformCommandRegistry::new();
        registry.add(
            "get_ports {sig}",
            vec![("sig".to_string(), CommandArg::from(scalar("clk")))],
        );

        let namer = |_: &Signal| -> Option<String> { None };
        assert!(matches!(
            registry.render(&namer).unwrap_err(),
            EngineError::UnresolvedSignal { .. }
        ));
    }

    #[test]
    fn brace_escapes() {
        let mut registry = PlatformCommandRegistry::new();
        registry.add(
            "set_property DIFF_TERM {{TRUE}} {p}",
            vec![("p".to_string(), CommandArg::from("A4"))],
        );
        let namer = |_: &Signal| -> Option<String> { None };
        assert_eq!(
            registry.render(&namer).unwrap(),
            vec!["set_property DIFF_TERM {TRUE} A4"]
        );
    }
}
