use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fields a list can be filtered on. The wire name is the camelCase query key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    Status,
    StartDate,
    EndDate,
    MinAmount,
    MaxAmount,
    TransactionHash,
    WalletAddress,
    Username,
}

impl FilterKey {
    pub const ALL: [FilterKey; 8] = [
        FilterKey::Status,
        FilterKey::StartDate,
        FilterKey::EndDate,
        FilterKey::MinAmount,
        FilterKey::MaxAmount,
        FilterKey::TransactionHash,
        FilterKey::WalletAddress,
        FilterKey::Username,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::Status => "status",
            FilterKey::StartDate => "startDate",
            FilterKey::EndDate => "endDate",
            FilterKey::MinAmount => "minAmount",
            FilterKey::MaxAmount => "maxAmount",
            FilterKey::TransactionHash => "transactionHash",
            FilterKey::WalletAddress => "walletAddress",
            FilterKey::Username => "username",
        }
    }
}

impl FromStr for FilterKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FilterKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown filter key '{}'", s))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of filter predicates. Blank values are never stored, so an empty
/// string and an absent key mean the same thing ("unset").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    values: BTreeMap<FilterKey, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (FilterKey, S)>,
        S: Into<String>,
    {
        let mut state = Self::new();
        for (key, value) in pairs {
            state.set(key, value);
        }
        state
    }

    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
    }

    pub fn remove(&mut self, key: FilterKey) {
        self.values.remove(&key);
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values.iter().map(|(key, value)| (*key, value.as_str()))
    }

    /// Outgoing query parameters; unset keys are simply omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_unset() {
        let state = FilterState::new()
            .with(FilterKey::Status, "")
            .with(FilterKey::Username, "   ");
        assert!(state.is_empty());
        assert!(state.to_query().is_empty());
    }

    #[test]
    fn setting_blank_removes_existing_value() {
        let mut state = FilterState::new().with(FilterKey::MinAmount, "500");
        state.set(FilterKey::MinAmount, "");
        assert_eq!(state, FilterState::new());
    }

    #[test]
    fn query_uses_wire_names() {
        let state = FilterState::from_pairs([
            (FilterKey::Status, "PENDING"),
            (FilterKey::MinAmount, "100"),
            (FilterKey::WalletAddress, ""),
        ]);
        assert_eq!(
            state.to_query(),
            vec![
                ("status", "PENDING".to_string()),
                ("minAmount", "100".to_string()),
            ]
        );
    }

    #[test]
    fn parses_wire_names() {
        assert_eq!(
            "transactionHash".parse::<FilterKey>().unwrap(),
            FilterKey::TransactionHash
        );
        assert!("amount".parse::<FilterKey>().is_err());
    }
}
