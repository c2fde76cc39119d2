mod follow_ticks;
