use fxhash::FxHashMap;

/// Defines state that is built during [`Pattern::generate`](crate::Pattern::generate).
///
/// This is implemented for
/// - `String` to produce the generated text
/// - `Vec<u8>` to produce the generated text as raw bytes
/// - `u64` to produce an identifier of the random choices taken during the
///   walk. See [`crate::Pattern::how_many`] for more info.
/// - [`Captures`] to record the text produced by each visited group
///
/// Tuples of visitors run side by side over a single traversal, so
/// `(String, Captures)` returns the generated text together with its capture
/// list, and `(String, u64)` pairs the text with its choice-path id.
///
/// You can implement this yourself, for example to count characters, collect
/// only a particular group, or bucket outputs by the alternation branches
/// taken.
pub trait Visitor {
    fn new() -> Self;
    /// An alternation picked its `index`-th branch.
    fn visit_or(&mut self, _index: usize) {}
    /// A repetition drew `reps` as its count.
    fn visit_repetition(&mut self, _reps: usize) {}
    /// Evaluation of the group with the given stable id began.
    fn visit_group(&mut self, _id: usize) {}
    /// Evaluation of the group with the given stable id completed.
    fn visit_group_end(&mut self, _id: usize) {}
    /// A literal or class-chosen character was generated.
    fn visit_char(&mut self, _c: char) {}
}

/// Returns the generated text.
impl Visitor for String {
    fn new() -> Self {
        Default::default()
    }
    fn visit_char(&mut self, c: char) {
        self.push(c);
    }
}

/// Returns the generated text as a byte sequence.
impl Visitor for Vec<u8> {
    fn new() -> Self {
        Default::default()
    }
    fn visit_char(&mut self, c: char) {
        let mut b = [0; 4];
        let result = c.encode_utf8(&mut b);
        self.extend(result.as_bytes());
    }
}

fn id_hash(val: &mut u64, event: u64) {
    *val = fxhash::hash64(&(event, *val));
}

/// Returns an identifier of the choices taken during the traversal.
impl Visitor for u64 {
    fn new() -> Self {
        u64::MAX
    }
    fn visit_or(&mut self, index: usize) {
        id_hash(self, fxhash::hash64(&(0u64, index as u64)));
    }
    fn visit_repetition(&mut self, reps: usize) {
        id_hash(self, fxhash::hash64(&(1u64, reps as u64)));
    }
    fn visit_group(&mut self, id: usize) {
        id_hash(self, fxhash::hash64(&(2u64, id as u64)));
    }
    fn visit_group_end(&mut self, id: usize) {
        id_hash(self, fxhash::hash64(&(3u64, id as u64)));
    }
    fn visit_char(&mut self, c: char) {
        id_hash(self, fxhash::hash64(&(4u64, c as u64)));
    }
}

/// Capture list recorded during a generation.
///
/// Each group reserves a slot the first time it is reached and fills it once
/// its text has been generated; a group re-entered inside a repetition reuses
/// its slot, keeping the last text. Groups sitting in an alternation branch
/// that was never taken get no slot, so slot order is visitation order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Captures {
    slots: Vec<Option<String>>,
    by_group: FxHashMap<usize, usize>,
    open: Vec<(usize, String)>,
}

impl Captures {
    /// Number of reserved slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The text of the `i`-th visited group, if that slot was filled.
    pub fn get(&self, i: usize) -> Option<&str> {
        self.slots.get(i).and_then(|slot| slot.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
        self.slots.iter().map(|slot| slot.as_deref())
    }

    pub fn into_vec(self) -> Vec<Option<String>> {
        self.slots
    }
}

impl Visitor for Captures {
    fn new() -> Self {
        Default::default()
    }

    fn visit_group(&mut self, id: usize) {
        let slot = match self.by_group.get(&id) {
            Some(&slot) => slot,
            None => {
                self.slots.push(None);
                let slot = self.slots.len() - 1;
                self.by_group.insert(id, slot);
                slot
            }
        };
        self.open.push((slot, String::new()));
    }

    fn visit_group_end(&mut self, _id: usize) {
        if let Some((slot, text)) = self.open.pop() {
            if let Some((_, parent)) = self.open.last_mut() {
                parent.push_str(&text);
            }
            self.slots[slot] = Some(text);
        }
    }

    fn visit_char(&mut self, c: char) {
        if let Some((_, text)) = self.open.last_mut() {
            text.push(c);
        }
    }
}

macro_rules! impl_visitor_tuple {
    () => (
        impl Visitor for () {
            #[inline]
            fn new() {}
        }
    );

    ( $($name:ident)+) => (
        #[allow(non_snake_case)]
        impl<$($name: Visitor),+> Visitor for ($($name,)+) {
            fn new() -> ($($name,)+) {
                ($({ let x: $name = Visitor::new(); x},)+)
            }

            fn visit_or(&mut self, index: usize) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_or(index);)+
            }
            fn visit_repetition(&mut self, reps: usize) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_repetition(reps);)+
            }
            fn visit_group(&mut self, id: usize) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_group(id);)+
            }
            fn visit_group_end(&mut self, id: usize) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_group_end(id);)+
            }
            fn visit_char(&mut self, c: char) {
                let ($(ref mut $name,)+) = *self;
                $($name.visit_char(c);)+
            }
        }
    );
}

impl_visitor_tuple! {}
impl_visitor_tuple! { T }
impl_visitor_tuple! { T B }
impl_visitor_tuple! { T B C }
impl_visitor_tuple! { T B C D }
