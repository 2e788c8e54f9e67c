//! Scripting-surface metadata and string-keyed access.
//!
//! The component's contract with the scripting layer and editor UI is
//! declarative: a `'static` [`ClassMeta`] table lists the one read/write
//! property, the three callables, and the one subscribable event. The
//! dynamic entry points on [`SimClientComponent`] route string-keyed
//! scripting calls onto the typed API with `serde_json::Value` arguments.

use serde_json::Value;

use sim_host::HostContext;

use crate::component::SimClientComponent;

/// Metadata about a scripting-visible property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyMeta {
    /// Property name as scripting addresses it.
    pub name: &'static str,
    /// Whether scripting may only read it.
    pub read_only: bool,
    /// One-line description for editor UI.
    pub doc: &'static str,
}

/// Metadata about a scripting-callable operation.
#[derive(Debug, Clone, Copy)]
pub struct FunctionMeta {
    /// Function name as scripting addresses it.
    pub name: &'static str,
    /// Parameter names, in call order.
    pub params: &'static [&'static str],
    /// One-line description for editor UI.
    pub doc: &'static str,
}

/// Metadata about a subscribable multicast event.
#[derive(Debug, Clone, Copy)]
pub struct EventMeta {
    /// Event name as scripting addresses it.
    pub name: &'static str,
    /// Parameter names the event delivers.
    pub params: &'static [&'static str],
    /// One-line description for editor UI.
    pub doc: &'static str,
}

/// The full scripting surface of one component class.
#[derive(Debug, Clone, Copy)]
pub struct ClassMeta {
    /// Class name as scripting addresses it.
    pub class: &'static str,
    /// Readable/writable properties.
    pub properties: &'static [PropertyMeta],
    /// Callable operations.
    pub functions: &'static [FunctionMeta],
    /// Subscribable events.
    pub events: &'static [EventMeta],
}

/// Scripting surface of [`SimClientComponent`].
pub const SIM_CLIENT_CLASS: ClassMeta = ClassMeta {
    class: "SimClient",
    properties: &[PropertyMeta {
        name: "base_url",
        read_only: false,
        doc: "Origin the component targets, scheme://host[:port].",
    }],
    functions: &[
        FunctionMeta {
            name: "load",
            params: &[],
            doc: "POST /load; also issued automatically on begin play.",
        },
        FunctionMeta {
            name: "save",
            params: &[],
            doc: "POST /save; also issued automatically on end play.",
        },
        FunctionMeta {
            name: "tick",
            params: &["event", "params"],
            doc: "POST /tick, delivering one event to the simulation.",
        },
    ],
    events: &[EventMeta {
        name: "state_updated",
        params: &["json_text"],
        doc: "Raw JSON text every time the sim replies.",
    }],
};

/// Errors surfaced to the scripting layer.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// The named property does not exist on this class.
    #[error("unknown property `{0}`")]
    UnknownProperty(String),

    /// The named function does not exist on this class.
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    /// A property write carried a value of the wrong type.
    #[error("property `{property}` expects {expected}")]
    PropertyType {
        /// The property being written.
        property: &'static str,
        /// What the property accepts.
        expected: &'static str,
    },

    /// A call carried the wrong number of arguments.
    #[error("function `{function}` takes {expected} argument(s), got {got}")]
    BadArity {
        /// The function being called.
        function: &'static str,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        got: usize,
    },

    /// A call argument had the wrong type.
    #[error("argument `{argument}` of `{function}` expects {expected}")]
    BadArgument {
        /// The function being called.
        function: &'static str,
        /// The offending parameter name.
        argument: &'static str,
        /// What the parameter accepts.
        expected: &'static str,
    },
}

impl SimClientComponent {
    /// The declarative scripting surface of this class.
    #[must_use]
    pub fn class_meta() -> &'static ClassMeta {
        &SIM_CLIENT_CLASS
    }

    /// Read a scripting-visible property.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::UnknownProperty`] for names not in the class
    /// metadata.
    pub fn get_property(&self, name: &str) -> Result<Value, ScriptError> {
        match name {
            "base_url" => Ok(Value::String(self.base_url().to_string())),
            other => Err(ScriptError::UnknownProperty(other.to_string())),
        }
    }

    /// Write a scripting-visible property.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::UnknownProperty`] for unknown names and
    /// [`ScriptError::PropertyType`] when the value has the wrong type.
    pub fn set_property(&mut self, name: &str, value: Value) -> Result<(), ScriptError> {
        match name {
            "base_url" => match value {
                Value::String(url) => {
                    self.set_base_url(url);
                    Ok(())
                }
                _ => Err(ScriptError::PropertyType {
                    property: "base_url",
                    expected: "a string",
                }),
            },
            other => Err(ScriptError::UnknownProperty(other.to_string())),
        }
    }

    /// Invoke a scripting-callable operation by name.
    ///
    /// `tick` takes a string event and a structured JSON value for params;
    /// the value is serialised before it is inlined, so script callers
    /// cannot produce an invalid body. Native callers that already hold
    /// serialised JSON use [`SimClientComponent::tick`] directly.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::UnknownFunction`], [`ScriptError::BadArity`],
    /// or [`ScriptError::BadArgument`]. Dispatch itself never fails —
    /// transport problems surface later through the completion path.
    pub fn call(
        &mut self,
        ctx: &HostContext<'_>,
        function: &str,
        args: &[Value],
    ) -> Result<(), ScriptError> {
        match function {
            "load" => {
                expect_arity("load", args, 0)?;
                self.load(ctx);
                Ok(())
            }
            "save" => {
                expect_arity("save", args, 0)?;
                self.save(ctx);
                Ok(())
            }
            "tick" => {
                expect_arity("tick", args, 2)?;
                let event = args[0].as_str().ok_or(ScriptError::BadArgument {
                    function: "tick",
                    argument: "event",
                    expected: "a string",
                })?;
                let params = args[1].to_string();
                self.tick(ctx, event, &params);
                Ok(())
            }
            other => Err(ScriptError::UnknownFunction(other.to_string())),
        }
    }
}

fn expect_arity(function: &'static str, args: &[Value], expected: usize) -> Result<(), ScriptError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ScriptError::BadArity {
            function,
            expected,
            got: args.len(),
        })
    }
}
