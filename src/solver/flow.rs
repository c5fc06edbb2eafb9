use super::types::{SolveError, SolveOptions};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::atomic::Ordering;
use std::time::Instant;

/// Arc résiduel. Chaque arc est apparié à son inverse (`rev`) de coût opposé.
#[derive(Debug, Clone)]
pub(super) struct FlowEdge {
    pub(super) to: usize,
    /// Capacité résiduelle restante.
    pub(super) capacity: u32,
    pub(super) cost: i64,
    pub(super) rev: usize,
    /// Arc suivant sortant du même nœud (listes d'adjacence en étoile).
    pub(super) next: Option<usize>,
}

/// Réseau de flot sur listes d'adjacence compactes.
///
/// Les nœuds sont des indices ; la sémantique (source, personne, personne-jour,
/// créneau, puits) vit dans le constructeur de réseau, pas ici.
#[derive(Debug, Clone)]
pub(super) struct FlowGraph {
    pub(super) heads: Vec<Option<usize>>,
    pub(super) edges: Vec<FlowEdge>,
}

impl FlowGraph {
    pub(super) fn new(node_count: usize) -> Self {
        Self {
            heads: vec![None; node_count],
            edges: Vec::new(),
        }
    }

    pub(super) fn node_count(&self) -> usize {
        self.heads.len()
    }

    /// Ajoute l'arc `from → to` et son inverse résiduel. Renvoie l'indice de l'arc direct.
    pub(super) fn add_edge(&mut self, from: usize, to: usize, capacity: u32, cost: i64) -> usize {
        let edge_index = self.edges.len();
        let reverse_index = edge_index + 1;
        self.edges.push(FlowEdge {
            to,
            capacity,
            cost,
            rev: reverse_index,
            next: self.heads[from],
        });
        self.heads[from] = Some(edge_index);
        self.edges.push(FlowEdge {
            to: from,
            capacity: 0,
            cost: -cost,
            rev: edge_index,
            next: self.heads[to],
        });
        self.heads[to] = Some(reverse_index);
        edge_index
    }

    /// Flot porté par un arc direct, déduit de sa capacité initiale.
    pub(super) fn flow_on(&self, edge_index: usize, initial_capacity: u32) -> u32 {
        initial_capacity - self.edges[edge_index].capacity
    }
}

/// Flot maximal de coût minimal par chemins augmentants successifs.
///
/// Plus courts chemins sous coûts réduits (potentiels de nœuds) calculés par
/// Dijkstra ; les potentiels initiaux sont nuls car tous les coûts directs
/// sont agencés non négatifs. Capacités entières ⇒ flot optimal entier.
/// S'arrête dès que `demand` unités sont acheminées ou qu'aucun chemin ne reste,
/// et renvoie le flot atteint (l'appelant décide de l'infaisabilité).
pub(super) fn min_cost_flow(
    graph: &mut FlowGraph,
    source: usize,
    sink: usize,
    demand: u32,
    opts: &SolveOptions,
) -> Result<u32, SolveError> {
    let n = graph.node_count();
    let mut potential = vec![0i64; n];
    let mut flow = 0u32;
    let started = Instant::now();

    while flow < demand {
        // Point d'annulation : uniquement entre deux augmentations.
        if let Some(limit) = opts.timeout {
            if started.elapsed() >= limit {
                return Err(SolveError::TimedOut(limit));
            }
        }
        if let Some(flag) = &opts.cancel {
            if flag.load(Ordering::Relaxed) {
                return Err(SolveError::Cancelled);
            }
        }

        let mut dist = vec![i64::MAX; n];
        let mut prev_edge = vec![usize::MAX; n];
        let mut heap = BinaryHeap::new();
        dist[source] = 0;
        heap.push(Reverse((0i64, source)));

        while let Some(Reverse((d, u))) = heap.pop() {
            if d > dist[u] {
                continue;
            }
            let mut next = graph.heads[u];
            while let Some(edge_index) = next {
                let edge = &graph.edges[edge_index];
                if edge.capacity > 0 {
                    let reduced = d + edge.cost + potential[u] - potential[edge.to];
                    if reduced < dist[edge.to] {
                        dist[edge.to] = reduced;
                        prev_edge[edge.to] = edge_index;
                        heap.push(Reverse((reduced, edge.to)));
                    }
                }
                next = edge.next;
            }
        }

        if dist[sink] == i64::MAX {
            break;
        }
        for v in 0..n {
            if dist[v] < i64::MAX {
                potential[v] += dist[v];
            }
        }

        let mut push = demand - flow;
        let mut v = sink;
        while v != source {
            let edge = &graph.edges[prev_edge[v]];
            push = push.min(edge.capacity);
            v = graph.edges[edge.rev].to;
        }

        let mut v = sink;
        while v != source {
            let edge_index = prev_edge[v];
            let rev = graph.edges[edge_index].rev;
            graph.edges[edge_index].capacity -= push;
            graph.edges[rev].capacity += push;
            v = graph.edges[rev].to;
        }
        flow += push;

        #[cfg(feature = "logging")]
        tracing::trace!(flow, demand, pushed = push, "augmenting path applied");
    }

    #[cfg(feature = "logging")]
    tracing::debug!(flow, demand, "min-cost flow terminated");

    Ok(flow)
}
