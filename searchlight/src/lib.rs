use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
    hash::Hash,
};

pub trait State: Clone + Eq + Hash + Sized {
    type Data;
    type Action: Copy;
    type Successors: IntoIterator<Item = (Self::Action, Self)>;

    fn successors(&self, data: &Self::Data) -> Self::Successors;
    fn is_goal(&self, data: &Self::Data) -> bool;
    fn heuristic(&self, data: &Self::Data) -> usize;
}

#[derive(Eq, PartialEq)]
struct Node {
    estimate: usize,
    distance: usize,
    index: usize,
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    // Reversed for the max-heap: lowest estimate first, oldest entry on ties.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.index.cmp(&self.index))
    }
}

pub fn solve<S: State>(initial: S, data: &S::Data) -> Option<Vec<(S::Action, S)>> {
    // Entry i of the arena records how node i + 1 was first reached;
    // node index 0 is the initial state.
    let mut arena: Vec<(usize, S::Action, S)> = Vec::new();
    let mut g_scores = HashMap::new();
    let mut closed = HashSet::new();
    let mut queue = BinaryHeap::new();

    g_scores.insert(initial.clone(), 0usize);
    queue.push(Node {
        estimate: initial.heuristic(data),
        distance: 0,
        index: 0,
    });

    while let Some(node) = queue.pop() {
        let state = if node.index == 0 {
            &initial
        } else {
            &arena[node.index - 1].2
        };

        if closed.contains(state) {
            continue;
        }
        if state.is_goal(data) {
            return Some(reconstruct(&arena, node.index));
        }

        let state = state.clone();
        let successors = state.successors(data);
        closed.insert(state);

        for (action, successor) in successors {
            if closed.contains(&successor) {
                continue;
            }

            let tentative = node.distance + 1;
            match g_scores.get(&successor) {
                Some(&g) if g <= tentative => continue,
                _ => (),
            }
            g_scores.insert(successor.clone(), tentative);

            let estimate = tentative + successor.heuristic(data);
            arena.push((node.index, action, successor));
            queue.push(Node {
                estimate,
                distance: tentative,
                index: arena.len(),
            });
        }
    }

    None
}

fn reconstruct<S: State>(arena: &[(usize, S::Action, S)], mut index: usize) -> Vec<(S::Action, S)> {
    let mut path = Vec::new();
    while index != 0 {
        let (parent, action, state) = &arena[index - 1];
        path.push((*action, state.clone()));
        index = *parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    // A walk along the number line; blocked cells bound the reachable range.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    struct Walk(i32);

    struct Track {
        goal: i32,
        blocked: &'static [i32],
    }

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    enum Step {
        Left,
        Right,
    }

    impl State for Walk {
        type Data = Track;
        type Action = Step;
        type Successors = Vec<(Step, Walk)>;

        fn successors(&self, data: &Track) -> Self::Successors {
            [(Step::Left, Walk(self.0 - 1)), (Step::Right, Walk(self.0 + 1))]
                .into_iter()
                .filter(|(_, walk)| !data.blocked.contains(&walk.0))
                .collect()
        }

        fn is_goal(&self, data: &Track) -> bool {
            self.0 == data.goal
        }

        fn heuristic(&self, data: &Track) -> usize {
            (data.goal - self.0).unsigned_abs() as usize
        }
    }

    #[test]
    fn finds_shortest_walk() {
        let track = Track {
            goal: 4,
            blocked: &[],
        };
        let path = solve(Walk(0), &track).unwrap();
        assert_eq!(path.len(), 4);
        assert!(path.iter().all(|(step, _)| *step == Step::Right));
        assert_eq!(path.last().unwrap().1, Walk(4));
    }

    #[test]
    fn initial_goal_yields_empty_path() {
        let track = Track {
            goal: 0,
            blocked: &[],
        };
        assert_eq!(solve(Walk(0), &track), Some(Vec::new()));
    }

    #[test]
    fn exhausts_walled_off_goal() {
        let track = Track {
            goal: 5,
            blocked: &[-2, 3],
        };
        assert_eq!(solve(Walk(0), &track), None);
    }
}
