//! Partitions a month's items into the four quadrants for display.

use crate::{
    core::month_store::MonthSnapshot,
    domain::{Item, Quadrant},
};

/// Four display lists, each ordered by price descending. Rebuilt on every
/// change and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadrantView {
    pub important_urgent: Vec<Item>,
    pub important: Vec<Item>,
    pub urgent: Vec<Item>,
    pub neither: Vec<Item>,
}

impl QuadrantView {
    pub fn bucket(&self, quad: Quadrant) -> &[Item] {
        match quad {
            Quadrant::ImportantUrgent => &self.important_urgent,
            Quadrant::Important => &self.important,
            Quadrant::Urgent => &self.urgent,
            Quadrant::Neither => &self.neither,
        }
    }

    fn bucket_mut(&mut self, quad: Quadrant) -> &mut Vec<Item> {
        match quad {
            Quadrant::ImportantUrgent => &mut self.important_urgent,
            Quadrant::Important => &mut self.important,
            Quadrant::Urgent => &mut self.urgent,
            Quadrant::Neither => &mut self.neither,
        }
    }

    /// Buckets in matrix order, paired with their quadrant.
    pub fn iter(&self) -> impl Iterator<Item = (Quadrant, &[Item])> {
        Quadrant::ALL
            .into_iter()
            .map(move |quad| (quad, self.bucket(quad)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, items)| items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct ViewService;

impl ViewService {
    /// Stable sort by price descending, then partition by quadrant.
    pub fn build(items: &[Item]) -> QuadrantView {
        let mut sorted: Vec<&Item> = items.iter().collect();
        sorted.sort_by(|a, b| b.price.cmp(&a.price));
        let mut view = QuadrantView::default();
        for item in sorted {
            view.bucket_mut(item.quad).push(item.clone());
        }
        view
    }

    pub fn build_for(snapshot: &MonthSnapshot) -> QuadrantView {
        Self::build(&snapshot.items)
    }
}
