use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::comment_browser::CommentBrowser;
use crate::map_explorer::{ExplorerSettings, MapExplorer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Map,
    Comments,
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::Map => write!(f, "map"),
            Tab::Comments => write!(f, "comments"),
        }
    }
}

/// The mounted view. Only one exists at a time.
pub enum ActiveView {
    Map(MapExplorer),
    Comments(CommentBrowser),
}

/// Switches between the map and comment views.
///
/// Leaving a view unmounts it: the map is torn down and the comment browser
/// starts over from the sample data on its next mount.
pub struct TabController {
    view: ActiveView,
    settings: ExplorerSettings,
    mounts: u64,
}

impl TabController {
    pub fn new(settings: ExplorerSettings) -> Self {
        Self {
            view: ActiveView::Map(MapExplorer::mount(1, settings)),
            settings,
            mounts: 1,
        }
    }

    pub fn active_tab(&self) -> Tab {
        match self.view {
            ActiveView::Map(_) => Tab::Map,
            ActiveView::Comments(_) => Tab::Comments,
        }
    }

    /// Returns whether the rendered view changed.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.active_tab() == tab {
            return false;
        }

        self.remount(tab);
        info!("Switched to {} view", tab);
        true
    }

    /// Drops all view state and starts over on the map, as on a fresh page
    /// load. Results still in flight for the old map are discarded.
    pub fn reset(&mut self) -> Tab {
        self.remount(Tab::Map);
        info!("View state reset");
        Tab::Map
    }

    fn remount(&mut self, tab: Tab) {
        if let ActiveView::Map(explorer) = &mut self.view {
            explorer.teardown();
        }

        self.mounts += 1;
        self.view = match tab {
            Tab::Map => ActiveView::Map(MapExplorer::mount(self.mounts, self.settings)),
            Tab::Comments => ActiveView::Comments(CommentBrowser::default()),
        };
    }

    pub fn map(&self) -> Option<&MapExplorer> {
        match &self.view {
            ActiveView::Map(explorer) => Some(explorer),
            ActiveView::Comments(_) => None,
        }
    }

    pub fn map_mut(&mut self) -> Option<&mut MapExplorer> {
        match &mut self.view {
            ActiveView::Map(explorer) => Some(explorer),
            ActiveView::Comments(_) => None,
        }
    }

    pub fn comments(&self) -> Option<&CommentBrowser> {
        match &self.view {
            ActiveView::Comments(browser) => Some(browser),
            ActiveView::Map(_) => None,
        }
    }

    pub fn comments_mut(&mut self) -> Option<&mut CommentBrowser> {
        match &mut self.view {
            ActiveView::Comments(browser) => Some(browser),
            ActiveView::Map(_) => None,
        }
    }
}
