use crate::entity::{AdminError, FilterKey, FilterState, ResourceKind};
use crate::table::quick_filter::{self, QuickPreset};

/// Advanced and quick filter state of one resource list.
///
/// `local` is what the filter form is editing; `applied` is what the last
/// fetch was made with. Edits only reach the displayed data once applied.
#[derive(Debug, Clone)]
pub struct FilterModel {
    resource: ResourceKind,
    local: FilterState,
    applied: FilterState,
}

impl FilterModel {
    pub fn new(resource: ResourceKind) -> Self {
        Self {
            resource,
            local: FilterState::new(),
            applied: FilterState::new(),
        }
    }

    pub fn resource(&self) -> ResourceKind {
        self.resource
    }

    pub fn local(&self) -> &FilterState {
        &self.local
    }

    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    /// Change one field of the form. Amounts are passed through untouched.
    pub fn edit(&mut self, key: FilterKey, value: &str) -> Result<(), AdminError> {
        self.validate(key, value)?;
        self.local.set(key, value);
        Ok(())
    }

    /// Submit the form as it stands.
    pub fn apply_local(&mut self) -> &FilterState {
        self.applied = self.local.clone();
        &self.applied
    }

    /// Replace the filter state wholesale.
    pub fn apply(&mut self, filter: FilterState) -> Result<&FilterState, AdminError> {
        for (key, value) in filter.iter() {
            self.validate(key, value)?;
        }
        self.local = filter.clone();
        self.applied = filter;
        Ok(&self.applied)
    }

    pub fn clear(&mut self) {
        self.local = FilterState::new();
        self.applied = FilterState::new();
    }

    /// Replace the filter state with a preset, discarding pending edits.
    pub fn select_preset(&mut self, key: &str) -> Result<&'static QuickPreset, AdminError> {
        let preset = quick_filter::find_preset(self.resource, key)
            .ok_or_else(|| AdminError::UnknownPreset(key.to_string()))?;
        self.local = preset.filter.clone();
        self.applied = preset.filter.clone();
        Ok(preset)
    }

    /// Highlighted preset, `None` while a custom filter is applied.
    pub fn active_preset(&self) -> Option<&'static QuickPreset> {
        quick_filter::matching_preset(self.resource, &self.applied)
    }

    pub fn has_active_filters(&self) -> bool {
        !self.applied.is_empty()
    }

    fn validate(&self, key: FilterKey, value: &str) -> Result<(), AdminError> {
        if !self.resource.filter_keys().contains(&key) {
            return Err(AdminError::InvalidFilter(format!(
                "{} cannot be filtered by {}",
                self.resource, key
            )));
        }

        let value = value.trim();
        if key == FilterKey::Status
            && !value.is_empty()
            && !self.resource.status_vocabulary().contains(&value)
        {
            return Err(AdminError::InvalidFilter(format!(
                "unknown {} status '{}'",
                self.resource, value
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_stay_local_until_applied() {
        let mut model = FilterModel::new(ResourceKind::Deposits);
        model.edit(FilterKey::Status, "PENDING").unwrap();

        assert!(model.applied().is_empty());
        assert_eq!(model.local().get(FilterKey::Status), Some("PENDING"));

        model.apply_local();
        assert_eq!(model.applied().get(FilterKey::Status), Some("PENDING"));
    }

    #[test]
    fn blank_filters_equal_cleared_filters() {
        let mut applied = FilterModel::new(ResourceKind::Withdrawals);
        applied
            .apply(FilterState::from_pairs([
                (FilterKey::Status, ""),
                (FilterKey::MinAmount, ""),
                (FilterKey::Username, " "),
            ]))
            .unwrap();

        let mut cleared = FilterModel::new(ResourceKind::Withdrawals);
        cleared.clear();

        assert_eq!(applied.applied().to_query(), cleared.applied().to_query());
        assert!(!applied.has_active_filters());
    }

    #[test]
    fn preset_overwrites_manual_edits() {
        let mut model = FilterModel::new(ResourceKind::Withdrawals);
        model.edit(FilterKey::Username, "bob").unwrap();
        model.apply_local();
        model.edit(FilterKey::Status, "APPROVED").unwrap();

        let preset = model.select_preset("high-value").unwrap();

        assert_eq!(model.applied(), &preset.filter);
        assert_eq!(model.local(), &preset.filter);
        assert_eq!(model.active_preset().map(|p| p.key), Some("high-value"));
    }

    #[test]
    fn manual_edit_makes_filter_custom() {
        let mut model = FilterModel::new(ResourceKind::Deposits);
        model.select_preset("pending").unwrap();
        model.edit(FilterKey::Username, "carol").unwrap();
        model.apply_local();

        assert!(model.active_preset().is_none());
    }

    #[test]
    fn cleared_filter_highlights_all() {
        let mut model = FilterModel::new(ResourceKind::Deposits);
        model.select_preset("rejected").unwrap();
        model.clear();
        assert_eq!(model.active_preset().map(|p| p.key), Some("all"));
    }

    #[test]
    fn rejects_keys_outside_schema() {
        let mut deposits = FilterModel::new(ResourceKind::Deposits);
        assert!(matches!(
            deposits.edit(FilterKey::WalletAddress, "0xabc"),
            Err(AdminError::InvalidFilter(_))
        ));

        let mut users = FilterModel::new(ResourceKind::Users);
        assert!(users.edit(FilterKey::Status, "PENDING").is_err());
    }

    #[test]
    fn status_must_come_from_resource_vocabulary() {
        let mut deposits = FilterModel::new(ResourceKind::Deposits);
        assert!(deposits.edit(FilterKey::Status, "COMPLETED").is_err());

        let mut withdrawals = FilterModel::new(ResourceKind::Withdrawals);
        assert!(withdrawals.edit(FilterKey::Status, "COMPLETED").is_ok());
    }

    #[test]
    fn amounts_are_not_validated() {
        let mut model = FilterModel::new(ResourceKind::Deposits);
        model.edit(FilterKey::MinAmount, "900").unwrap();
        model.edit(FilterKey::MaxAmount, "ten").unwrap();
        model.apply_local();
        assert_eq!(model.applied().get(FilterKey::MaxAmount), Some("ten"));
    }

    #[test]
    fn unknown_preset_is_an_error() {
        let mut model = FilterModel::new(ResourceKind::Deposits);
        assert!(matches!(
            model.select_preset("completed"),
            Err(AdminError::UnknownPreset(key)) if key == "completed"
        ));
    }
}
