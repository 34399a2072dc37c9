use log::trace;
use std::collections::{
    hash_map::Entry::{Occupied, Vacant},
    HashMap,
};
use thiserror::Error;

use super::values::RuntimeVal;


#[derive(Error, Debug, PartialEq)]
pub enum EnvError {
    #[error("Undefined variable '{0}'.")]
    UndeclaredVar(String),
}

#[derive(Debug, Default, PartialEq)]
struct Frame {
    vars: HashMap<String, RuntimeVal>,
    // None for the global frame
    parent: Option<usize>,
}

// Frames live in an arena and point to their parent by index. Scopes
// are strictly nested so the active chain is always a suffix of the arena
#[derive(Debug, PartialEq)]
pub struct Env {
    frames: Vec<Frame>,
    current: usize,
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}

impl Env {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
            current: 0,
        }
    }

    // Redeclaration in the same frame is allowed and overwrites the value
    pub fn declare_var(&mut self, var: String, value: RuntimeVal) {
        self.frames[self.current].vars.insert(var, value);
    }

    pub fn lookup_var(&self, var: &str) -> Result<&RuntimeVal, EnvError> {
        let idx = self.resolve(var)?;

        self.frames[idx]
            .vars
            .get(var)
            .ok_or_else(|| EnvError::UndeclaredVar(var.to_string()))
    }

    // Assignment never creates a variable
    pub fn assign_var(&mut self, var: &str, value: RuntimeVal) -> Result<(), EnvError> {
        let idx = self.resolve(var)?;

        match self.frames[idx].vars.entry(var.to_string()) {
            Occupied(mut entry) => {
                entry.insert(value);
                Ok(())
            }
            Vacant(_) => Err(EnvError::UndeclaredVar(var.to_string())),
        }
    }

    // Runs the closure in a fresh child frame. The frame is released and the
    // previous one restored whatever the closure returns
    pub fn with_scope<T>(&mut self, f: impl FnOnce(&mut Env) -> T) -> T {
        let enclosing = self.current;

        self.frames.push(Frame {
            vars: HashMap::new(),
            parent: Some(enclosing),
        });
        self.current = self.frames.len() - 1;
        trace!("Entering scope, depth {}", self.depth());

        let res = f(self);

        self.frames.truncate(self.current);
        self.current = enclosing;
        trace!("Leaving scope, depth {}", self.depth());

        res
    }

    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = &self.frames[self.current];

        while let Some(parent) = frame.parent {
            depth += 1;
            frame = &self.frames[parent];
        }

        depth
    }

    // We look for the innermost frame declaring the variable
    fn resolve(&self, var: &str) -> Result<usize, EnvError> {
        let mut idx = self.current;

        loop {
            let frame = &self.frames[idx];

            if frame.vars.contains_key(var) {
                return Ok(idx);
            }

            match frame.parent {
                Some(parent) => idx = parent,
                None => return Err(EnvError::UndeclaredVar(var.to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_global_env() {
        let env = Env::new();
        assert_eq!(env.depth(), 1);
        assert!(env.frames[0].parent.is_none());
    }

    #[test]
    fn declare_var() {
        let mut env = Env::new();
        let var: String = "position".to_string();
        env.declare_var(var.clone(), RuntimeVal::Nil);

        assert!(env.frames[0].vars.contains_key(&var));
        assert_eq!(env.lookup_var(&var), Ok(&RuntimeVal::Nil));
    }

    #[test]
    fn redeclare_var_overwrites() {
        let mut env = Env::new();
        env.declare_var("a".into(), RuntimeVal::Number(1.));
        env.declare_var("a".into(), RuntimeVal::Str("one".into()));

        assert_eq!(env.lookup_var("a"), Ok(&RuntimeVal::Str("one".into())));
    }

    #[test]
    fn lookup_undeclared_var() {
        let env = Env::new();

        assert_eq!(
            env.lookup_var("position"),
            Err(EnvError::UndeclaredVar("position".into()))
        );
        assert_eq!(
            EnvError::UndeclaredVar("position".into()).to_string(),
            "Undefined variable 'position'."
        );
    }

    #[test]
    fn resolve_var_in_glob_env_from_child() {
        let mut env = Env::new();
        env.declare_var("position".into(), RuntimeVal::Bool(true));

        env.with_scope(|env| {
            assert_eq!(env.resolve("position"), Ok(0));
            assert_eq!(env.lookup_var("position"), Ok(&RuntimeVal::Bool(true)));
        });
    }

    #[test]
    fn shadowing() {
        let mut env = Env::new();
        env.declare_var("x".into(), RuntimeVal::Number(1.));

        env.with_scope(|env| {
            env.declare_var("x".into(), RuntimeVal::Number(2.));
            assert_eq!(env.lookup_var("x"), Ok(&RuntimeVal::Number(2.)));
        });

        assert_eq!(env.lookup_var("x"), Ok(&RuntimeVal::Number(1.)));
    }

    #[test]
    fn child_vars_are_dropped_with_scope() {
        let mut env = Env::new();

        env.with_scope(|env| env.declare_var("tmp".into(), RuntimeVal::Nil));

        assert!(env.lookup_var("tmp").is_err());
        assert_eq!(env.frames.len(), 1);
    }

    #[test]
    fn assign_var() {
        let mut env = Env::new();
        env.declare_var("x".into(), RuntimeVal::Number(1.));

        env.with_scope(|env| {
            env.with_scope(|env| env.assign_var("x", RuntimeVal::Number(5.)))
        })
        .expect("x is declared in the global frame");

        assert_eq!(env.lookup_var("x"), Ok(&RuntimeVal::Number(5.)));
    }

    #[test]
    fn assign_undeclared_var() {
        let mut env = Env::new();

        assert_eq!(
            env.assign_var("x", RuntimeVal::Nil),
            Err(EnvError::UndeclaredVar("x".into()))
        );
        // No global was created
        assert!(env.lookup_var("x").is_err());
    }

    #[test]
    fn depth_is_restored_on_error() {
        let mut env = Env::new();

        let res: Result<(), EnvError> = env.with_scope(|env| {
            assert_eq!(env.depth(), 2);
            env.with_scope(|env| {
                assert_eq!(env.depth(), 3);
                env.lookup_var("missing").map(|_| ())
            })
        });

        assert!(res.is_err());
        assert_eq!(env.depth(), 1);
        assert_eq!(env.frames.len(), 1);
    }
}
