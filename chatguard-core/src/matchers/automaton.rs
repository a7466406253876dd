// chatguard-core/src/matchers/automaton.rs
//! Index-based Aho-Corasick automaton for linear-time multi-pattern search.
//!
//! Nodes live in a flat arena and refer to each other by index, so the
//! failure links (which point back toward the root) never form ownership
//! cycles. Output lists are failure-closed at build time: search collects
//! matches from the current node alone and never walks failure links for
//! outputs.
//!
//! License: MIT OR APACHE 2.0

use std::collections::{HashMap, VecDeque};
use log::warn;

use crate::config::MAX_TERM_LENGTH;
use crate::filter_match::WordMatch;

/// One arena node of the trie.
///
/// `outputs` holds the ids of every pattern ending at this node or at any
/// node reachable over the failure chain, ordered and de-duplicated.
#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, u32>,
    failure: u32,
    outputs: Vec<u32>,
}

/// A compiled, immutable multi-pattern matcher for one word category.
///
/// Safe to share across threads for unlimited concurrent read-only search;
/// `find_matches` never mutates automaton state.
#[derive(Debug)]
pub struct AhoCorasickEngine {
    nodes: Vec<TrieNode>,
    patterns: Vec<String>,
    pattern_lens: Vec<usize>,
}

impl AhoCorasickEngine {
    /// Compiles an automaton from an iterable of candidate terms.
    ///
    /// Terms are Unicode-lowercased before insertion, so the automaton is
    /// case-insensitive by construction. Empty terms are silently skipped;
    /// over-long terms are skipped with a warning. Duplicate terms are
    /// inserted once, first occurrence wins. An empty input yields a
    /// root-only automaton that matches nothing.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut engine = Self {
            nodes: vec![TrieNode::default()],
            patterns: Vec::new(),
            pattern_lens: Vec::new(),
        };

        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if word.chars().count() > MAX_TERM_LENGTH {
                warn!(
                    "Skipping term of length {} (maximum is {}).",
                    word.chars().count(),
                    MAX_TERM_LENGTH
                );
                continue;
            }
            engine.insert(&word.to_lowercase());
        }

        engine.build_failure_links();
        engine
    }

    /// Number of distinct patterns compiled into this automaton.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    fn insert(&mut self, term: &str) {
        if self.patterns.iter().any(|p| p == term) {
            return;
        }
        let id = self.patterns.len() as u32;

        let mut node = 0usize;
        for ch in term.chars() {
            let existing = self.nodes[node].children.get(&ch).copied();
            node = match existing {
                Some(child) => child as usize,
                None => {
                    let child = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(ch, child);
                    child as usize
                }
            };
        }

        let outputs = &mut self.nodes[node].outputs;
        if !outputs.contains(&id) {
            outputs.push(id);
        }
        self.patterns.push(term.to_string());
        self.pattern_lens.push(term.chars().count());
    }

    /// Breadth-first failure-link pass.
    ///
    /// Immediately after a node's failure link is assigned, the failure
    /// target's entire output list is appended to the node's own, producing
    /// the failure closure.
    fn build_failure_links(&mut self) {
        let mut queue = VecDeque::new();

        let root_children: Vec<u32> = self.nodes[0].children.values().copied().collect();
        for child in root_children {
            self.nodes[child as usize].failure = 0;
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            let edges: Vec<(char, u32)> = self.nodes[current as usize]
                .children
                .iter()
                .map(|(&ch, &child)| (ch, child))
                .collect();

            for (ch, child) in edges {
                let mut probe = self.nodes[current as usize].failure as usize;
                let target = loop {
                    if let Some(&next) = self.nodes[probe].children.get(&ch) {
                        break next;
                    }
                    if probe == 0 {
                        break 0;
                    }
                    probe = self.nodes[probe].failure as usize;
                };

                self.nodes[child as usize].failure = target;

                let inherited = self.nodes[target as usize].outputs.clone();
                let outputs = &mut self.nodes[child as usize].outputs;
                for id in inherited {
                    if !outputs.contains(&id) {
                        outputs.push(id);
                    }
                }

                queue.push_back(child);
            }
        }
    }

    /// Standard Aho-Corasick scan over already-normalized clean text.
    ///
    /// The clean text is assumed to be case-folded identically to build-time
    /// folding; the automaton does not re-fold. Offsets in the returned
    /// matches are inclusive character offsets into `clean`. Every
    /// occurrence of every pattern, including overlapping ones, is reported
    /// exactly once, in scan order but NOT sorted by start position.
    pub fn find_matches(&self, clean: &str) -> Vec<WordMatch> {
        let mut matches = Vec::new();
        let mut node = 0usize;

        for (position, ch) in clean.chars().enumerate() {
            while !self.nodes[node].children.contains_key(&ch) && node != 0 {
                node = self.nodes[node].failure as usize;
            }
            if let Some(&next) = self.nodes[node].children.get(&ch) {
                node = next as usize;
            }

            for &id in &self.nodes[node].outputs {
                let len = self.pattern_lens[id as usize];
                matches.push(WordMatch {
                    word: self.patterns[id as usize].clone(),
                    start: position + 1 - len,
                    end: position,
                });
            }
        }

        matches
    }
}
