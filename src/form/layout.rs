use super::ControlId;

/// One visible option group, its controls arranged in a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupLayout {
    pub title: String,
    /// Row-major; only the last row may be shorter than the column count
    pub rows: Vec<Vec<ControlId>>,
}

impl GroupLayout {
    pub fn new<S: ToString>(title: S, controls: &[ControlId], columns: usize) -> GroupLayout {
        GroupLayout {
            title: title.to_string(),
            rows: controls
                .chunks(columns.max(1))
                .map(<[ControlId]>::to_vec)
                .collect(),
        }
    }

    pub fn controls(&self) -> impl Iterator<Item = ControlId> + '_ {
        self.rows.iter().flatten().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<ControlId> {
        (0..n).map(ControlId).collect()
    }

    #[test]
    fn controls_fill_rows_first() {
        let layout = GroupLayout::new("Options", &ids(5), 3);
        assert_eq!(
            layout.rows,
            vec![
                vec![ControlId(0), ControlId(1), ControlId(2)],
                vec![ControlId(3), ControlId(4)],
            ]
        );
        assert_eq!(layout.controls().count(), 5);
    }

    #[test]
    fn zero_columns_means_one() {
        let layout = GroupLayout::new("Options", &ids(2), 0);
        assert_eq!(layout.rows.len(), 2);
    }
}
