//! Use [`OrEnvExt`] when a cli arg (e.g. `network: Option<MtNetwork>`) can
//! also be set by a fallback env variable (e.g. `$NETWORK`). After parsing the
//! args, call `args.network.or_env_mut("NETWORK")?`.
//!
//! Works with any `FromStr` type; an env value that fails to parse is an
//! error rather than being silently ignored.

use std::{env, str::FromStr};

use anyhow::Context;

pub trait OrEnvExt: Sized {
    /// Takes ownership of the arg if set, otherwise initializes it from env.
    fn or_env(mut self, env_var: &'static str) -> anyhow::Result<Self> {
        self.or_env_mut(env_var)?;
        Ok(self)
    }

    /// If the arg is not set, initialize it from env in place.
    fn or_env_mut(
        &mut self,
        env_var: &'static str,
    ) -> anyhow::Result<&mut Self>;
}

/// `Ok(None)` if the var is unset, `Err` if it's set but not UTF-8.
fn env_var_opt(env_var: &'static str) -> anyhow::Result<Option<String>> {
    match env::var(env_var) {
        Ok(val_str) => Ok(Some(val_str)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(s)) =>
            Err(anyhow::format_err!("invalid unicode: '{s:?}'")),
    }
}

impl<T> OrEnvExt for Option<T>
where
    T: FromStr,
    T::Err: Into<anyhow::Error>,
{
    fn or_env_mut(
        &mut self,
        env_var: &'static str,
    ) -> anyhow::Result<&mut Option<T>> {
        if self.is_some() {
            return Ok(self);
        }

        if let Some(val_str) = env_var_opt(env_var).context(env_var)? {
            let val = T::from_str(&val_str)
                .map_err(Into::into)
                .with_context(|| format!("Invalid env value `${env_var}`"))?;
            *self = Some(val);
        }

        Ok(self)
    }
}
