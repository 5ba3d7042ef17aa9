mod merge_refusals;
mod three_way_merge;
