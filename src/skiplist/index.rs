use crate::arena::{Arena, Handle};
use crate::entry::Entry;
use rand::{weak_rng, Rng, XorShiftRng};
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

/// The default maximum height of a `ScoreIndex`.
pub const DEFAULT_MAX_HEIGHT: usize = 10;

/// The default level-promotion probability of a `ScoreIndex`.
pub const DEFAULT_P: f64 = 0.5;

struct Node<T, U>
where T: Ord
{
    entry: Entry<T, U>,
    forward: Vec<Option<Handle>>,
}

impl<T, U> Node<T, U>
where T: Ord
{
    fn new(key: U, score: T, height: usize) -> Self {
        Node {
            entry: Entry { score, key },
            forward: vec![None; height],
        }
    }

    fn height(&self) -> usize {
        self.forward.len()
    }
}

fn random_height<R>(rng: &mut R, p: f64, max_height: usize) -> usize
where R: Rng
{
    let mut height = 1;
    while rng.next_f64() < p && height < max_height {
        height += 1;
    }
    height
}

/// A score-ordered index implemented by a skiplist over arena-allocated
/// nodes.
///
/// A skiplist is a probabilistic data structure that maintains a linked
/// hierarchy of subsequences. The first subsequence is a sorted linked list
/// of all the entries that it contains. Each successive subsequence skips
/// over approximately `1 / p` entries of the previous one. Using the sparser
/// subsequences, entries can be skipped and searching, insertion, and
/// deletion can be done in approximately logarithmic time.
///
/// Entries are ordered by score; the key is payload and never participates
/// in the ordering. Multiple entries may share one score. Nodes live in an
/// arena and address each other by handle, and the head is a plain array of
/// links that holds no entry, so a lookup can never land on it.
///
/// # Examples
/// ```
/// use skip_index::skiplist::ScoreIndex;
///
/// let mut index = ScoreIndex::new();
/// index.insert("one", 1);
/// index.insert("four", 4);
///
/// assert_eq!(index.get(&4).map(|entry| &entry.key), Some(&"four"));
/// assert_eq!(index.get(&3), None);
/// assert_eq!(index.len(), 2);
///
/// assert_eq!(index.remove(&1).map(|entry| entry.key), Some("one"));
/// assert_eq!(index.remove(&1), None);
/// ```
pub struct ScoreIndex<T, U, R = XorShiftRng>
where
    T: Ord,
    R: Rng,
{
    arena: Arena<Node<T, U>>,
    head: Vec<Option<Handle>>,
    height: usize,
    p: f64,
    len: usize,
    rng: R,
}

impl<T, U> ScoreIndex<T, U>
where T: Ord
{
    /// Constructs a new, empty `ScoreIndex<T, U>` with the default geometry
    /// (`DEFAULT_MAX_HEIGHT` levels, promotion probability `DEFAULT_P`) and
    /// a fresh entropy-seeded generator.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let index: ScoreIndex<u32, &str> = ScoreIndex::new();
    /// ```
    pub fn new() -> Self {
        Self::with_config(DEFAULT_MAX_HEIGHT, DEFAULT_P)
    }

    /// Constructs a new, empty `ScoreIndex<T, U>` with a custom maximum
    /// height and promotion probability.
    ///
    /// # Panics
    /// Panics if `max_height` is zero or if `p` is outside of `[0, 1)`.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::with_config(16, 0.25);
    /// index.insert("one", 1);
    /// assert!(index.height() <= 16);
    /// ```
    pub fn with_config(max_height: usize, p: f64) -> Self {
        Self::with_rng(max_height, p, weak_rng())
    }
}

impl<T, U, R> ScoreIndex<T, U, R>
where
    T: Ord,
    R: Rng,
{
    /// Constructs a new, empty `ScoreIndex<T, U, R>` that draws node heights
    /// from a caller-owned random source. Injecting the source pins down the
    /// exact shape of the structure, which is mostly useful for
    /// deterministic tests.
    ///
    /// # Panics
    /// Panics if `max_height` is zero or if `p` is outside of `[0, 1)`.
    ///
    /// # Examples
    /// ```
    /// use rand::SeedableRng;
    /// use rand::XorShiftRng;
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    /// let mut index = ScoreIndex::with_rng(10, 0.5, rng);
    /// index.insert("one", 1);
    /// assert!(index.contains(&1));
    /// ```
    pub fn with_rng(max_height: usize, p: f64, rng: R) -> Self {
        assert!(max_height >= 1, "Error: maximum height must be at least one.");
        assert!(
            p >= 0.0 && p < 1.0,
            "Error: promotion probability must be in [0, 1).",
        );
        ScoreIndex {
            arena: Arena::new(),
            head: vec![None; max_height],
            height: 0,
            p,
            len: 0,
            rng,
        }
    }

    // `None` addresses the head, which has no node of its own.
    fn link(&self, node: Option<Handle>, level: usize) -> Option<Handle> {
        match node {
            Some(handle) => self.arena[handle].forward[level],
            None => self.head[level],
        }
    }

    fn link_mut(&mut self, node: Option<Handle>, level: usize) -> &mut Option<Handle> {
        match node {
            Some(handle) => &mut self.arena[handle].forward[level],
            None => &mut self.head[level],
        }
    }

    // Strict less-than descent. Returns, for every level, the last node with
    // a score below `score`; levels at or above the active height keep the
    // head as predecessor.
    fn update_path(&self, score: &T) -> Vec<Option<Handle>> {
        let mut update = vec![None; self.head.len()];
        let mut curr = None;
        for level in (0..self.height).rev() {
            while let Some(next) = self.link(curr, level) {
                if self.arena[next].entry.score < *score {
                    curr = Some(next);
                } else {
                    break;
                }
            }
            update[level] = curr;
        }
        update
    }

    /// Inserts a key with a score into the index, returning the height
    /// assigned to the new node.
    ///
    /// Scores are not deduplicated: inserting an already-present score adds
    /// a second entry, placed immediately before the entries already holding
    /// that score.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::new();
    /// let height = index.insert("one", 1);
    /// assert!(height >= 1 && height <= index.max_height());
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn insert(&mut self, key: U, score: T) -> usize {
        let update = self.update_path(&score);
        let height = random_height(&mut self.rng, self.p, self.head.len());
        if height > self.height {
            // the newly activated levels hold no nodes yet; `update` already
            // points them at the head
            self.height = height;
        }

        let node = self.arena.allocate(Node::new(key, score, height));
        for level in 0..height {
            let next = mem::replace(self.link_mut(update[level], level), Some(node));
            self.arena[node].forward[level] = next;
        }
        self.len += 1;
        height
    }

    /// Returns the entry holding a particular score. Returns `None` if no
    /// entry holds the score. If multiple entries share the score, the one
    /// inserted earliest is returned.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::new();
    /// index.insert("one", 1);
    /// assert_eq!(index.get(&0), None);
    /// assert_eq!(index.get(&1).map(|entry| &entry.key), Some(&"one"));
    /// ```
    pub fn get(&self, score: &T) -> Option<&Entry<T, U>> {
        let mut curr = None;
        for level in (0..self.height).rev() {
            while let Some(next) = self.link(curr, level) {
                if self.arena[next].entry.score <= *score {
                    curr = Some(next);
                } else {
                    break;
                }
            }
        }

        match curr {
            Some(handle) if self.arena[handle].entry.score == *score => {
                Some(&self.arena[handle].entry)
            }
            _ => None,
        }
    }

    /// Returns a mutable reference to the key stored with a particular
    /// score. Returns `None` if no entry holds the score. The score itself
    /// stays immutable once inserted, as the ordering depends on it.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::new();
    /// index.insert("one", 1);
    /// *index.get_mut(&1).unwrap() = "uno";
    /// assert_eq!(index.get(&1).map(|entry| &entry.key), Some(&"uno"));
    /// ```
    pub fn get_mut(&mut self, score: &T) -> Option<&mut U> {
        let mut curr = None;
        for level in (0..self.height).rev() {
            while let Some(next) = self.link(curr, level) {
                if self.arena[next].entry.score <= *score {
                    curr = Some(next);
                } else {
                    break;
                }
            }
        }

        match curr {
            Some(handle) if self.arena[handle].entry.score == *score => {
                Some(&mut self.arena[handle].entry.key)
            }
            _ => None,
        }
    }

    /// Removes an entry holding a particular score from the index and
    /// returns it. Returns `None` if no entry holds the score. If multiple
    /// entries share the score, the one inserted latest is removed.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::new();
    /// index.insert("one", 1);
    /// assert_eq!(index.remove(&1).map(|entry| entry.key), Some("one"));
    /// assert_eq!(index.remove(&1), None);
    /// ```
    pub fn remove(&mut self, score: &T) -> Option<Entry<T, U>> {
        let update = self.update_path(score);
        let node = match self.link(update[0], 0) {
            Some(handle) if self.arena[handle].entry.score == *score => handle,
            _ => return None,
        };

        for level in 0..self.arena[node].height() {
            let next = self.arena[node].forward[level];
            *self.link_mut(update[level], level) = next;
        }
        self.len -= 1;
        Some(self.arena.free(node).entry)
    }

    /// Checks if any entry holds a particular score.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::new();
    /// index.insert("one", 1);
    /// assert!(!index.contains(&0));
    /// assert!(index.contains(&1));
    /// ```
    pub fn contains(&self, score: &T) -> bool {
        self.get(score).is_some()
    }

    /// Returns the number of entries in the index.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::new();
    /// index.insert("one", 1);
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the index is empty.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let index: ScoreIndex<u32, &str> = ScoreIndex::new();
    /// assert!(index.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of levels currently in active use. Insertions may
    /// raise it up to `max_height`; removals never lower it, so it may
    /// exceed the height of every remaining node.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::with_config(8, 0.5);
    /// assert_eq!(index.height(), 0);
    /// index.insert("one", 1);
    /// assert!(index.height() >= 1);
    /// ```
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the maximum height a node can be assigned.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let index: ScoreIndex<u32, &str> = ScoreIndex::new();
    /// assert_eq!(index.max_height(), 10);
    /// ```
    pub fn max_height(&self) -> usize {
        self.head.len()
    }

    /// Clears the index, removing all entries. The configured maximum height
    /// and promotion probability are kept.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::new();
    /// index.insert("one", 1);
    /// index.insert("two", 2);
    /// index.clear();
    /// assert_eq!(index.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        for link in &mut self.head {
            *link = None;
        }
        self.height = 0;
        self.len = 0;
    }

    /// Returns an iterator over the index. The iterator yields entries in
    /// non-decreasing score order.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::new();
    /// index.insert("one", 1);
    /// index.insert("two", 2);
    ///
    /// let mut iterator = index.iter();
    /// assert_eq!(iterator.next().map(|entry| entry.score), Some(1));
    /// assert_eq!(iterator.next().map(|entry| entry.score), Some(2));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<T, U> {
        Iter {
            arena: &self.arena,
            current: self.head[0],
        }
    }

    /// Returns an iterator over the entries reachable at a particular level,
    /// in non-decreasing score order. Levels at or above the active height
    /// yield nothing. Purely observational; the structure is not changed.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::with_config(1, 0.0);
    /// index.insert("one", 1);
    /// index.insert("two", 2);
    ///
    /// let mut iterator = index.iter_level(0);
    /// assert_eq!(iterator.next().map(|entry| &entry.key), Some(&"one"));
    /// assert_eq!(iterator.next().map(|entry| &entry.key), Some(&"two"));
    /// assert_eq!(iterator.next(), None);
    /// assert_eq!(index.iter_level(1).next(), None);
    /// ```
    pub fn iter_level(&self, level: usize) -> LevelIter<T, U> {
        LevelIter {
            arena: &self.arena,
            current: if level < self.height {
                self.head[level]
            } else {
                None
            },
            level,
        }
    }

    /// Renders the index as text for inspection, one line per active level
    /// from the top down, in the form
    /// `level <i>: head-> key(score)-> key(score)-> end`.
    ///
    /// # Examples
    /// ```
    /// use skip_index::skiplist::ScoreIndex;
    ///
    /// let mut index = ScoreIndex::with_config(1, 0.0);
    /// index.insert("one", 1);
    /// index.insert("two", 2);
    ///
    /// assert_eq!(index.dump(), "level 0: head-> one(1)-> two(2)-> end\n");
    /// ```
    pub fn dump(&self) -> String
    where
        T: fmt::Display,
        U: fmt::Display,
    {
        let mut out = String::new();
        for level in (0..self.height).rev() {
            out.push_str(&format!("level {}: head-> ", level));
            for entry in self.iter_level(level) {
                out.push_str(&format!("{}({})-> ", entry.key, entry.score));
            }
            out.push_str("end\n");
        }
        out
    }
}

impl<T, U> Default for ScoreIndex<T, U>
where T: Ord
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, R> IntoIterator for ScoreIndex<T, U, R>
where
    T: Ord,
    R: Rng,
{
    type IntoIter = IntoIter<T, U>;
    type Item = Entry<T, U>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            current: self.head[0],
            arena: self.arena,
        }
    }
}

impl<'a, T, U, R> IntoIterator for &'a ScoreIndex<T, U, R>
where
    T: 'a + Ord,
    U: 'a,
    R: Rng,
{
    type IntoIter = Iter<'a, T, U>;
    type Item = &'a Entry<T, U>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `ScoreIndex<T, U>`.
///
/// This iterator yields entries in non-decreasing score order, draining the
/// arena as it goes.
pub struct IntoIter<T, U>
where T: Ord
{
    arena: Arena<Node<T, U>>,
    current: Option<Handle>,
}

impl<T, U> Iterator for IntoIter<T, U>
where T: Ord
{
    type Item = Entry<T, U>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let node = self.arena.free(handle);
        self.current = node.forward[0];
        Some(node.entry)
    }
}

/// An iterator for `ScoreIndex<T, U>`.
///
/// This iterator yields entries in non-decreasing score order.
pub struct Iter<'a, T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    arena: &'a Arena<Node<T, U>>,
    current: Option<Handle>,
}

impl<'a, T, U> Iterator for Iter<'a, T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type Item = &'a Entry<T, U>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let node = &self.arena[handle];
        self.current = node.forward[0];
        Some(&node.entry)
    }
}

/// A single-level iterator for `ScoreIndex<T, U>`.
///
/// This iterator yields the entries reachable at one level of the index, in
/// non-decreasing score order.
pub struct LevelIter<'a, T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    arena: &'a Arena<Node<T, U>>,
    current: Option<Handle>,
    level: usize,
}

impl<'a, T, U> Iterator for LevelIter<'a, T, U>
where
    T: 'a + Ord,
    U: 'a,
{
    type Item = &'a Entry<T, U>;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let node = &self.arena[handle];
        self.current = node.forward[self.level];
        Some(&node.entry)
    }
}

impl<'a, T, U, R> Index<&'a T> for ScoreIndex<T, U, R>
where
    T: Ord,
    R: Rng,
{
    type Output = U;

    fn index(&self, score: &T) -> &Self::Output {
        self.get(score)
            .map(|entry| &entry.key)
            .expect("Score does not exist.")
    }
}

impl<'a, T, U, R> IndexMut<&'a T> for ScoreIndex<T, U, R>
where
    T: Ord,
    R: Rng,
{
    fn index_mut(&mut self, score: &T) -> &mut Self::Output {
        self.get_mut(score).expect("Score does not exist.")
    }
}
