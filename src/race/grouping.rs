//! Grouping engine - per-tick peloton partition and lane assignment.
//!
//! Rebuilt from scratch every tick; nothing carries over between ticks
//! except what is derivable from current positions.

use crate::race::engine::AthleteRuntime;

/// Distance gap (meters) that splits consecutive runners into new groups.
pub const GROUP_GAP: f32 = 8.0;

/// The three fixed lateral lane offsets.
pub const LANE_OFFSETS: [f32; 3] = [-0.6, 0.0, 0.6];

/// One peloton: the index of its leading runner and its member count.
#[derive(Debug, Clone, Copy)]
pub struct GroupInfo {
    pub leader: usize,
    pub size: usize,
}

/// Tick-local grouping result, indexed by runtime position.
#[derive(Debug, Clone)]
pub struct Grouping {
    /// Group id per runner.
    pub group_of: Vec<u32>,
    /// Group bookkeeping, indexed by group id.
    pub groups: Vec<GroupInfo>,
    /// Lane offset per runner.
    pub lanes: Vec<f32>,
    /// Distance of the nearest same-lane runner ahead, if any.
    pub lane_ahead: Vec<Option<f32>>,
}

impl Grouping {
    pub fn info_of(&self, idx: usize) -> &GroupInfo {
        &self.groups[self.group_of[idx] as usize]
    }

    pub fn is_leader(&self, idx: usize) -> bool {
        self.info_of(idx).leader == idx
    }
}

/// Partitions runners into groups by walking them in descending-distance
/// order and splitting when the gap to the previous runner exceeds
/// [`GROUP_GAP`]. Lanes rotate round-robin within each group; per-lane
/// memory of the last placed runner yields `lane_ahead` and resets at every
/// group boundary. Ties in distance break by ascending athlete id so the
/// result never depends on input order.
pub fn compute_groups(runtimes: &[AthleteRuntime]) -> Grouping {
    let mut order: Vec<usize> = (0..runtimes.len()).collect();
    order.sort_by(|&a, &b| {
        runtimes[b]
            .distance
            .partial_cmp(&runtimes[a].distance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| runtimes[a].id().cmp(runtimes[b].id()))
    });

    let mut group_of = vec![0u32; runtimes.len()];
    let mut groups: Vec<GroupInfo> = Vec::new();
    let mut lanes = vec![0.0f32; runtimes.len()];
    let mut lane_ahead = vec![None; runtimes.len()];
    let mut last_in_lane: [Option<f32>; 3] = [None; 3];
    let mut last_distance = f32::INFINITY;

    for &idx in &order {
        let distance = runtimes[idx].distance;
        if last_distance - distance > GROUP_GAP || groups.is_empty() {
            groups.push(GroupInfo {
                leader: idx,
                size: 0,
            });
            // Lane memory is per pack, so spacing is isolated per group.
            last_in_lane = [None; 3];
        }
        last_distance = distance;

        let group_id = groups.len() - 1;
        let group = &mut groups[group_id];
        let order_in_group = group.size;
        group.size += 1;
        group_of[idx] = group_id as u32;

        let lane = order_in_group % LANE_OFFSETS.len();
        lanes[idx] = LANE_OFFSETS[lane];
        lane_ahead[idx] = last_in_lane[lane];
        last_in_lane[lane] = Some(distance);
    }

    Grouping {
        group_of,
        groups,
        lanes,
        lane_ahead,
    }
}
