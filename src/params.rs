//! Typed view of the parameters set in a [`Configuration`].
//!
//! The canonical order below fixes the argument order on the ojdeploy command
//! line. `verbose` must come first or ojdeploy ignores it; the exclusive
//! group contributes at most one parameter.
use std::path::Path;

use crate::config::Configuration;

/// Every parameter name with an entry in the flag table, `jdevBinPath`
/// included even though it selects the program rather than an argument.
pub const PARAMETER_NAMES: [&str; 18] = [
    "verbose",
    "jdevBinPath",
    "workspaceFile",
    "buildFile",
    "outputFile",
    "profile",
    "project",
    "buildFileSchema",
    "baseDir",
    "nocompile",
    "nodependents",
    "clean",
    "nodatasources",
    "forceRewrite",
    "updateWebxmlEJBRefs",
    "defines",
    "statusLogFile",
    "timeout",
];

/// Value of a parameter; the variant selects how it is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue<'a> {
    /// A file or directory, rendered as configured.
    Path(&'a Path),
    /// Free text such as a profile or project name.
    Text(&'a str),
    /// A switch; only `true` is rendered.
    Flag(bool),
    /// Values joined into one comma-separated argument.
    List(&'a [String]),
    /// A count of seconds.
    Number(u64),
}

/// Semantic type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// See [`ParamValue::Path`].
    Path,
    /// See [`ParamValue::Text`].
    Text,
    /// See [`ParamValue::Flag`].
    Flag,
    /// See [`ParamValue::List`].
    List,
    /// See [`ParamValue::Number`].
    Number,
}

/// A named parameter that is present in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameter<'a> {
    /// Parameter name as used in config files and the flag table.
    pub name: &'static str,
    /// Configured value.
    pub value: ParamValue<'a>,
}

impl Parameter<'_> {
    /// Kind of the value.
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        match self.value {
            ParamValue::Path(_) => ParamKind::Path,
            ParamValue::Text(_) => ParamKind::Text,
            ParamValue::Flag(_) => ParamKind::Flag,
            ParamValue::List(_) => ParamKind::List,
            ParamValue::Number(_) => ParamKind::Number,
        }
    }
}

type Accessor = for<'a> fn(&'a Configuration) -> Option<ParamValue<'a>>;

struct ParamSpec {
    name: &'static str,
    read: Accessor,
}

impl ParamSpec {
    fn read<'a>(&self, config: &'a Configuration) -> Option<Parameter<'a>> {
        (self.read)(config).map(|value| Parameter {
            name: self.name,
            value,
        })
    }
}

enum Slot {
    Single(ParamSpec),
    /// Alternatives: the first present member wins.
    OneOf(&'static [ParamSpec]),
}

static EXCLUSIVE: [ParamSpec; 3] = [
    ParamSpec {
        name: "buildFile",
        read: |c| c.build_file().map(ParamValue::Path),
    },
    ParamSpec {
        name: "buildFileSchema",
        read: |c| c.build_file_schema().map(ParamValue::Flag),
    },
    ParamSpec {
        name: "profile",
        read: |c| c.profile().map(ParamValue::Text),
    },
];

static CANONICAL: [Slot; 15] = [
    Slot::Single(ParamSpec {
        name: "verbose",
        read: |c| c.verbose().map(ParamValue::Flag),
    }),
    Slot::OneOf(&EXCLUSIVE),
    Slot::Single(ParamSpec {
        name: "workspaceFile",
        read: |c| c.workspace_file().map(ParamValue::Path),
    }),
    Slot::Single(ParamSpec {
        name: "outputFile",
        read: |c| c.output_file().map(ParamValue::Path),
    }),
    Slot::Single(ParamSpec {
        name: "project",
        read: |c| c.project().map(ParamValue::Text),
    }),
    Slot::Single(ParamSpec {
        name: "baseDir",
        read: |c| c.base_dir().map(ParamValue::Path),
    }),
    Slot::Single(ParamSpec {
        name: "nocompile",
        read: |c| c.nocompile().map(ParamValue::Flag),
    }),
    Slot::Single(ParamSpec {
        name: "nodependents",
        read: |c| c.nodependents().map(ParamValue::Flag),
    }),
    Slot::Single(ParamSpec {
        name: "clean",
        read: |c| c.clean().map(ParamValue::Flag),
    }),
    Slot::Single(ParamSpec {
        name: "nodatasources",
        read: |c| c.nodatasources().map(ParamValue::Flag),
    }),
    Slot::Single(ParamSpec {
        name: "forceRewrite",
        read: |c| c.force_rewrite().map(ParamValue::Flag),
    }),
    Slot::Single(ParamSpec {
        name: "updateWebxmlEJBRefs",
        read: |c| c.update_webxml_ejb_refs().map(ParamValue::Flag),
    }),
    Slot::Single(ParamSpec {
        name: "statusLogFile",
        read: |c| c.status_log_file().map(ParamValue::Path),
    }),
    Slot::Single(ParamSpec {
        name: "timeout",
        read: |c| c.timeout().map(ParamValue::Number),
    }),
    Slot::Single(ParamSpec {
        name: "defines",
        read: |c| c.defines().map(ParamValue::List),
    }),
];

/// List the parameters present in `config`, in canonical order.
///
/// Presence is all that matters here: a `false` switch or an empty `defines`
/// list is still returned and left to the renderer to drop.
#[must_use]
pub fn enumerate(config: &Configuration) -> Vec<Parameter<'_>> {
    CANONICAL
        .iter()
        .filter_map(|slot| match slot {
            Slot::Single(spec) => spec.read(config),
            Slot::OneOf(specs) => specs.iter().find_map(|spec| spec.read(config)),
        })
        .collect()
}
