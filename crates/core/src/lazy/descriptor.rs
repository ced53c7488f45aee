//! Type descriptors: the member shape of a type, known before any instance exists

use crate::errors::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Number of arguments a method accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// A member declared on a type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Member {
    Method(Arity),
    Attribute,
}

/// Describes the methods and attributes of a type
///
/// Used by [`LazyInstance`](super::LazyInstance) to decide, before the wrapped
/// object exists, whether a name should produce a deferred method or force
/// instantiation, and afterwards to check that the factory built the right
/// kind of object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    ancestors: Vec<String>,
    members: BTreeMap<String, Member>,
}

impl TypeDescriptor {
    /// Start describing a type called `name`
    pub fn builder(name: impl Into<String>) -> TypeDescriptorBuilder {
        TypeDescriptorBuilder {
            name: name.into(),
            ancestors: Vec::new(),
            members: BTreeMap::new(),
            declared: BTreeSet::new(),
            problems: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of the types this one extends, nearest first
    pub fn ancestors(&self) -> &[String] {
        &self.ancestors
    }

    pub fn member(&self, name: &str) -> Option<Member> {
        self.members.get(name).copied()
    }

    pub fn is_method(&self, name: &str) -> bool {
        matches!(self.member(name), Some(Member::Method(_)))
    }

    pub fn method_arity(&self, name: &str) -> Option<Arity> {
        match self.member(name) {
            Some(Member::Method(arity)) => Some(arity),
            _ => None,
        }
    }

    pub fn methods(&self) -> impl Iterator<Item = (&str, Arity)> {
        self.members
            .iter()
            .filter_map(|(name, member)| match member {
                Member::Method(arity) => Some((name.as_str(), *arity)),
                Member::Attribute => None,
            })
    }

    /// Whether an object described by `other` counts as an instance of this type
    pub fn is_instance(&self, other: &TypeDescriptor) -> bool {
        other.name == self.name || other.ancestors.contains(&self.name)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Builder for [`TypeDescriptor`]
///
/// Problems are collected while building and reported by [`build`](Self::build).
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: String,
    ancestors: Vec<String>,
    members: BTreeMap<String, Member>,
    declared: BTreeSet<String>,
    problems: Vec<String>,
}

impl TypeDescriptorBuilder {
    /// Inherit all members of `parent`; later declarations may override them
    pub fn extends(mut self, parent: &TypeDescriptor) -> Self {
        self.ancestors.push(parent.name.clone());
        self.ancestors.extend(parent.ancestors.iter().cloned());
        for (name, member) in &parent.members {
            self.members.entry(name.clone()).or_insert(*member);
        }
        self
    }

    pub fn method(self, name: impl Into<String>, arity: Arity) -> Self {
        self.declare(name.into(), Member::Method(arity))
    }

    pub fn attribute(self, name: impl Into<String>) -> Self {
        self.declare(name.into(), Member::Attribute)
    }

    fn declare(mut self, name: String, member: Member) -> Self {
        let type_name = &self.name;
        if name.is_empty() {
            let problem = format!("type '{type_name}' declares a member with an empty name");
            self.problems.push(problem);
        } else if !self.declared.insert(name.clone()) {
            let problem = format!("type '{type_name}' declares '{name}' more than once");
            self.problems.push(problem);
        } else {
            self.members.insert(name, member);
        }
        self
    }

    pub fn build(self) -> Result<TypeDescriptor> {
        if self.name.trim().is_empty() {
            return Err(Error::type_kind("type descriptor name must not be empty"));
        }
        if let Some(problem) = self.problems.into_iter().next() {
            return Err(Error::type_kind(problem));
        }
        Ok(TypeDescriptor {
            name: self.name,
            ancestors: self.ancestors,
            members: self.members,
        })
    }
}

/// Types that can describe themselves without an instance
pub trait Describe {
    fn describe() -> Result<TypeDescriptor>;
}
