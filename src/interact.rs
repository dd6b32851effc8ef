use crate::dom::{
    Element, CELL_ATTRIBUTE, CELL_HOVER_CLASSNAME, CELL_LOCKED_CLASSNAME, PATH_ATTRIBUTE,
};

/// Placeholder shown by the path display while nothing is hovered or locked.
pub const DEFAULT_PATH_MESSAGE: &str = "Hover over a value to see its path";

#[derive(Debug, Clone)]
pub struct CellBinding {
    pub id: usize,
    pub path: String,
}

/// Hover/lock state machine for one render pass. At most one cell is
/// locked at a time system-wide; wiring a new pass clears the lock.
#[derive(Debug)]
pub struct InteractionController {
    cells: Vec<CellBinding>,
    locked: Option<usize>,
    display: String,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            locked: None,
            display: DEFAULT_PATH_MESSAGE.to_string(),
        }
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Second-phase wiring: walk the mounted tree, tag every table cell
    /// that directly holds a leaf span with a `data-cell` id and record
    /// its path binding. Must run only after the structure is fully
    /// built; cells do not exist as addressable nodes before that.
    pub fn wire(&mut self, root: &mut Element) {
        self.locked = None;
        self.display = DEFAULT_PATH_MESSAGE.to_string();
        let mut bindings: Vec<CellBinding> = Vec::new();
        root.for_each_mut(&mut |element: &mut Element| {
            if element.tag() != "td" {
                return;
            }
            let Some(path) = element
                .child_elements()
                .find_map(|child| child.attr(PATH_ATTRIBUTE))
                .map(str::to_string)
            else {
                return;
            };
            let id = bindings.len();
            element.set_attr(CELL_ATTRIBUTE, &id.to_string());
            bindings.push(CellBinding { id, path });
        });
        self.cells = bindings;
    }

    /// Hover: the visual applies unconditionally; the path is published
    /// only while no cell is locked.
    pub fn hover(&mut self, root: &mut Element, id: usize) {
        let Some(path) = self.cells.get(id).map(|cell| cell.path.clone()) else {
            return;
        };
        match Self::find_cell_mut(root, id) {
            Some(cell) => cell.add_class(CELL_HOVER_CLASSNAME),
            None => return,
        }
        if self.locked.is_none() {
            self.display = path;
        }
    }

    /// The hover visual goes away regardless of lock state.
    pub fn unhover(&mut self, root: &mut Element, id: usize) {
        if let Some(cell) = Self::find_cell_mut(root, id) {
            cell.remove_class(CELL_HOVER_CLASSNAME);
        }
    }

    /// Click: clicking the locked cell releases it and restores the
    /// placeholder; clicking any other cell moves the single lock there
    /// and publishes its path.
    pub fn click(&mut self, root: &mut Element, id: usize) {
        let Some(path) = self.cells.get(id).map(|cell| cell.path.clone()) else {
            return;
        };
        if self.locked == Some(id) {
            if let Some(cell) = Self::find_cell_mut(root, id) {
                cell.remove_class(CELL_LOCKED_CLASSNAME);
            }
            self.locked = None;
            self.display = DEFAULT_PATH_MESSAGE.to_string();
            return;
        }
        if let Some(previous) = self.locked.take() {
            if let Some(cell) = Self::find_cell_mut(root, previous) {
                cell.remove_class(CELL_LOCKED_CLASSNAME);
            }
        }
        if let Some(cell) = Self::find_cell_mut(root, id) {
            cell.add_class(CELL_LOCKED_CLASSNAME);
        }
        self.locked = Some(id);
        self.display = path;
    }

    pub fn display_text(&self) -> &str {
        &self.display
    }

    pub fn locked_cell(&self) -> Option<usize> {
        self.locked
    }

    pub fn locked_path(&self) -> Option<&str> {
        self.locked
            .and_then(|id| self.cells.get(id))
            .map(|cell| cell.path.as_str())
    }

    pub fn cells(&self) -> &[CellBinding] {
        &self.cells
    }

    fn find_cell_mut<'a>(root: &'a mut Element, id: usize) -> Option<&'a mut Element> {
        let id_text = id.to_string();
        root.find_mut(&|element: &Element| element.attr(CELL_ATTRIBUTE) == Some(id_text.as_str()))
    }
}
