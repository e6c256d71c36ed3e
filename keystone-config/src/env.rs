// Environment variable loading

use std::env;

/// Reads options from `<PREFIX>_<SECTION>__<OPTION>` variables.
///
/// `KEYSTONE_FEATURES__WEB_FLUX=true` sets `features.web_flux`. Variables
/// without the `__` separator (such as `KEYSTONE_LOG_LEVEL`) are not options
/// and are skipped.
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Collect every option variable from the process environment.
    pub fn load(&self) -> Vec<(String, String)> {
        self.collect(env::vars())
    }

    /// Collect option variables from an explicit set of pairs.
    pub fn collect<I>(&self, vars: I) -> Vec<(String, String)>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut options: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| self.option_path(&key).map(|path| (path, value)))
            .collect();
        options.sort();
        options
    }

    /// Map a variable name to an option path, if it is one.
    pub fn option_path(&self, key: &str) -> Option<String> {
        let rest = key.strip_prefix(&self.prefix)?.strip_prefix('_')?;
        if !rest.contains("__") {
            return None;
        }
        Some(rest.to_lowercase().replace("__", "."))
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new("KEYSTONE")
    }
}
